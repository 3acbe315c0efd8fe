use compact_str::CompactString;

use crate::error::{Result, TreemapError};
use crate::render::colors::AppColor;

/// A terminal node: one weighted rectangle in the final layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    size: f64,
    color: Option<AppColor>,
    label: Option<CompactString>,
}

/// Sizes must be finite and non-negative; anything else is rejected, never clamped.
pub(crate) fn validate_size(size: f64) -> Result<f64> {
    if size.is_finite() && size >= 0.0 {
        Ok(size)
    } else {
        Err(TreemapError::InvalidSize { size })
    }
}

impl Leaf {
    /// Create a leaf with the given size and no label or color.
    pub fn new(size: f64) -> Result<Self> {
        Ok(Self {
            size: validate_size(size)?,
            color: None,
            label: None,
        })
    }

    /// Create a leaf with optional label and explicit color.
    pub fn with_attrs(size: f64, label: Option<&str>, color: Option<AppColor>) -> Result<Self> {
        let mut leaf = Self::new(size)?;
        leaf.label = label.map(CompactString::new);
        leaf.color = color;
        Ok(leaf)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Overwrite the size. Containers holding this leaf keep their cached
    /// aggregate until they are recalculated.
    pub fn set_size(&mut self, size: f64) -> Result<()> {
        self.size = validate_size(size)?;
        Ok(())
    }

    pub fn color(&self) -> Option<AppColor> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<AppColor>) {
        self.color = color;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<CompactString>) {
        self.label = Some(label.into());
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    /// Replace the label with the concatenation of `parts`.
    /// An empty iterator leaves an empty (but present) label.
    pub fn set_label_parts<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut label = CompactString::default();
        for part in parts {
            label.push_str(part.as_ref());
        }
        self.label = Some(label);
    }
}
