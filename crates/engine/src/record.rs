use crate::fields::CanonicalField;

/// One price-list entry. Values are kept as the raw cell text; numbers are
/// only parsed when ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    source_file: String,
    name: Option<String>,
    price: Option<String>,
    weight: Option<String>,
}

impl Record {
    /// A record with no canonical fields set.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            name: None,
            price: None,
            weight: None,
        }
    }

    pub fn with_field(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            CanonicalField::Name => self.name = value,
            CanonicalField::Price => self.price = value,
            CanonicalField::Weight => self.weight = value,
        }
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_field(CanonicalField::Name, name)
    }

    pub fn with_price(self, price: impl Into<String>) -> Self {
        self.with_field(CanonicalField::Price, price)
    }

    pub fn with_weight(self, weight: impl Into<String>) -> Self {
        self.with_field(CanonicalField::Weight, weight)
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }

    pub fn weight(&self) -> Option<&str> {
        self.weight.as_deref()
    }
}
