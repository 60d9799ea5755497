use crate::error::NetworkError;
use crate::types::{Coord, PointId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifies the local coordinate frame of one survey district.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameKey {
    pub municipality: String,
    pub district: u32,
}

impl FrameKey {
    pub fn new(municipality: impl Into<String>, district: u32) -> Self {
        Self {
            municipality: municipality.into(),
            district,
        }
    }
}

impl std::fmt::Display for FrameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.municipality, self.district)
    }
}

/// District-local frame whose offset to the global frame is assigned once.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalFrame {
    key: FrameKey,
    offset: Option<Coord>,
    anchor: Option<PointId>,
}

impl LocalFrame {
    pub fn new(key: FrameKey) -> Self {
        Self {
            key,
            offset: None,
            anchor: None,
        }
    }

    pub fn key(&self) -> &FrameKey {
        &self.key
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.offset.is_some()
    }

    /// `global - local` once solved.
    pub fn offset(&self) -> Option<Coord> {
        self.offset
    }

    /// Point through which the frame was tied to the global frame.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Fixes the frame offset from a point known in both frames.
    pub fn solve(&mut self, anchor: &str, global: Coord, local: Coord) -> Result<Coord, NetworkError> {
        if self.is_solved() {
            return Err(NetworkError::FrameAlreadySolved {
                frame: self.key.clone(),
                anchor: anchor.to_string(),
            });
        }
        let offset = global - local;
        self.offset = Some(offset);
        self.anchor = Some(anchor.to_string());
        Ok(offset)
    }

    /// Global position of a local coordinate; `None` while unsolved.
    pub fn to_global(&self, local: Coord) -> Option<Coord> {
        self.offset.map(|offset| local + offset)
    }
}

/// All local frames of one run, in registration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalFrames {
    frames: IndexMap<FrameKey, LocalFrame>,
}

impl LocalFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a frame; a known key is left untouched.
    pub fn register(&mut self, key: FrameKey) -> &mut LocalFrame {
        self.frames
            .entry(key.clone())
            .or_insert_with(|| LocalFrame::new(key))
    }

    pub fn get(&self, key: &FrameKey) -> Option<&LocalFrame> {
        self.frames.get(key)
    }

    pub fn is_solved(&self, key: &FrameKey) -> bool {
        self.frames.get(key).is_some_and(LocalFrame::is_solved)
    }

    pub fn solve(
        &mut self,
        key: &FrameKey,
        anchor: &str,
        global: Coord,
        local: Coord,
    ) -> Result<Coord, NetworkError> {
        self.register(key.clone()).solve(anchor, global, local)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalFrame> {
        self.frames.values()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
