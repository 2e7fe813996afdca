//! Field paths addressing a location inside a manifest.
//!
//! Object fields are joined with `.`, sequence elements and map keys are
//! bracketed: `spec.networkSpec.subnets[0].name`, `spec.additionalTags[env]`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn new(root: impl Into<String>) -> Self {
        FieldPath {
            segments: vec![Segment::Field(root.into())],
        }
    }

    /// Path to a named field below this one.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.with(Segment::Field(name.into()))
    }

    /// Path to the `i`-th element of the sequence at this path.
    pub fn index(&self, i: usize) -> Self {
        self.with(Segment::Index(i))
    }

    /// Path to the entry `key` of the map at this path.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(Segment::Key(key.into()))
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        FieldPath { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
                Segment::Key(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}
