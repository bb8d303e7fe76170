use std::fmt;

/// Partition key attribute shared by both tables.
pub const PARTITION_KEY: &str = "vendor_id";

pub const DEFAULT_VENDORS_TABLE: &str = "Vendors";
pub const DEFAULT_INCENTIVES_TABLE: &str = "Incentives";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Vendors,
    Incentives,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Vendors, Table::Incentives];

    pub fn default_name(self) -> &'static str {
        match self {
            Self::Vendors => DEFAULT_VENDORS_TABLE,
            Self::Incentives => DEFAULT_INCENTIVES_TABLE,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Physical table names, resolved from deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub vendors: String,
    pub incentives: String,
}

impl TableNames {
    pub fn new(vendors: impl Into<String>, incentives: impl Into<String>) -> Self {
        Self {
            vendors: vendors.into(),
            incentives: incentives.into(),
        }
    }

    pub fn name_for(&self, table: Table) -> &str {
        match table {
            Table::Vendors => &self.vendors,
            Table::Incentives => &self.incentives,
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self::new(DEFAULT_VENDORS_TABLE, DEFAULT_INCENTIVES_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_match_deployed_tables() {
        let names = TableNames::default();
        assert_eq!(names.name_for(Table::Vendors), "Vendors");
        assert_eq!(names.name_for(Table::Incentives), "Incentives");
    }

    #[test]
    fn configured_names_override_defaults() {
        let names = TableNames::new("vendors-staging", "incentives-staging");
        assert_eq!(names.name_for(Table::Vendors), "vendors-staging");
        assert_eq!(names.name_for(Table::Incentives), "incentives-staging");
        assert_eq!(Table::Incentives.to_string(), "Incentives");
    }
}
