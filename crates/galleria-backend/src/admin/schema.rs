use std::fmt;

/// Optional product columns that older table layouts lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalColumn {
    Sku,
    Images,
}

impl OptionalColumn {
    pub const ALL: [OptionalColumn; 2] = [OptionalColumn::Sku, OptionalColumn::Images];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionalColumn::Sku => "sku",
            OptionalColumn::Images => "images",
        }
    }

    /// `true` when a backend error message names this column.
    ///
    /// The backend quotes column names (`'sku'` or `"sku"`), so a bare
    /// substring match would confuse `image_url` with `images`.
    #[must_use]
    pub fn named_in(self, message: &str) -> bool {
        let name = self.as_str();
        message.contains(&format!("'{name}'")) || message.contains(&format!("\"{name}\""))
    }
}

impl fmt::Display for OptionalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which optional columns the product table is known to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaCapabilities {
    pub sku: bool,
    pub images: bool,
}

impl SchemaCapabilities {
    /// Version 1 has neither optional column, version 2 adds `sku`, and
    /// version 3 (and anything newer) adds `images`.
    #[must_use]
    pub fn for_version(version: u32) -> Self {
        Self {
            sku: version >= 2,
            images: version >= 3,
        }
    }

    #[must_use]
    pub fn supports(self, column: OptionalColumn) -> bool {
        match column {
            OptionalColumn::Sku => self.sku,
            OptionalColumn::Images => self.images,
        }
    }

    /// Copy of `self` with `column` marked unsupported.
    #[must_use]
    pub fn without(self, column: OptionalColumn) -> Self {
        match column {
            OptionalColumn::Sku => Self { sku: false, ..self },
            OptionalColumn::Images => Self {
                images: false,
                ..self
            },
        }
    }
}

impl Default for SchemaCapabilities {
    fn default() -> Self {
        Self::for_version(3)
    }
}
