/// One detected object: what it is, where it is, and what the external
/// text engine read off its crop (if anything was legible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: Label,
    pub zone: Zone,
    pub text: Option<String>,
}

impl Detection {
    pub fn new(label: Label, zone: Zone) -> Self {
        Self {
            label,
            zone,
            text: None,
        }
    }
    pub fn with_text(label: Label, zone: Zone, text: &str) -> Self {
        Self {
            label,
            zone,
            text: Some(text.to_string()),
        }
    }
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Everything seen in one cycle, grouped by label. Absence of a label is
/// not an error, it is just an empty slice.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Observations {
    grouped: BTreeMap<Label, Vec<Detection>>,
}

impl Observations {
    pub fn get(&self, label: Label) -> &[Detection] {
        self.grouped.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn first(&self, label: Label) -> Option<&Detection> {
        self.get(label).first()
    }
    pub fn count(&self, label: Label) -> usize {
        self.get(label).len()
    }
    pub fn any(&self, label: Label) -> bool {
        !self.get(label).is_empty()
    }
}

impl From<Vec<Detection>> for Observations {
    fn from(detections: Vec<Detection>) -> Self {
        let mut grouped = BTreeMap::<Label, Vec<Detection>>::new();
        for d in detections {
            grouped.entry(d.label).or_default().push(d);
        }
        Self { grouped }
    }
}

impl FromIterator<Detection> for Observations {
    fn from_iter<I: IntoIterator<Item = Detection>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

use super::label::Label;
use super::zone::Zone;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
