//! Grid state shared between the populator and the view.
//! `GridState` is the display surface: a reducer keyed by generation so
//! completions from an older populate never touch the current grid.

use crate::media::MediaKind;
use crate::parser::ResponseParser;
use std::rc::Rc;
use yew::Reducible;

/// Epoch token, bumped by every populate.
pub type Generation = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub url: String,
}

/// Inputs for one populate call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridRequestConfig {
    pub endpoint_url: String,
    pub parser: ResponseParser,
    pub cell_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSource {
    pub url: String,
    pub kind: MediaKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellPhase {
    /// Waiting on the request or on the media element's load signal.
    Loading,
    Loaded,
    /// Request chain failed; still rendered as loading.
    Abandoned(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub media: Option<MediaSource>,
    pub phase: CellPhase,
}

impl GridCell {
    pub fn loading() -> Self {
        Self {
            media: None,
            phase: CellPhase::Loading,
        }
    }

    /// Why the request chain gave up, if it did.
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            CellPhase::Abandoned(reason) => Some(reason),
            _ => None,
        }
    }

    /// The loading marker is visible until the media reports completion.
    pub fn is_loading(&self) -> bool {
        !matches!(self.phase, CellPhase::Loaded)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridState {
    pub generation: Generation,
    pub cells: Vec<GridCell>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridAction {
    Reset {
        generation: Generation,
        cell_count: usize,
    },
    Fill {
        generation: Generation,
        index: usize,
        descriptor: MediaDescriptor,
    },
    Loaded {
        generation: Generation,
        index: usize,
    },
    Abandon {
        generation: Generation,
        index: usize,
        reason: String,
    },
}

impl GridAction {
    fn generation(&self) -> Generation {
        match self {
            GridAction::Reset { generation, .. }
            | GridAction::Fill { generation, .. }
            | GridAction::Loaded { generation, .. }
            | GridAction::Abandon { generation, .. } => *generation,
        }
    }
}

impl GridState {
    /// Applies an action in place. Returns whether anything changed.
    pub fn apply(&mut self, action: GridAction) -> bool {
        if let GridAction::Reset {
            generation,
            cell_count,
        } = action
        {
            self.generation = generation;
            self.cells = (0..cell_count).map(|_| GridCell::loading()).collect();
            return true;
        }
        if action.generation() != self.generation {
            log::debug!(
                "dropping stale write from generation {} (current {})",
                action.generation(),
                self.generation
            );
            return false;
        }
        match action {
            GridAction::Reset { .. } => false,
            GridAction::Fill {
                index, descriptor, ..
            } => match self.cells.get_mut(index) {
                Some(cell) if cell.media.is_none() && cell.phase == CellPhase::Loading => {
                    let kind = MediaKind::sniff(&descriptor.url);
                    cell.media = Some(MediaSource {
                        url: descriptor.url,
                        kind,
                    });
                    true
                }
                _ => false,
            },
            GridAction::Loaded { index, .. } => match self.cells.get_mut(index) {
                Some(cell) if cell.media.is_some() && cell.phase == CellPhase::Loading => {
                    cell.phase = CellPhase::Loaded;
                    true
                }
                _ => false,
            },
            GridAction::Abandon { index, reason, .. } => match self.cells.get_mut(index) {
                Some(cell) if cell.media.is_none() && cell.phase == CellPhase::Loading => {
                    cell.phase = CellPhase::Abandoned(reason);
                    true
                }
                _ => false,
            },
        }
    }

    pub fn loading_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_loading()).count()
    }

    #[cfg(test)]
    pub fn abandoned_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c.phase, CellPhase::Abandoned(_)))
            .count()
    }
}

impl Reducible for GridState {
    type Action = GridAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        if new.apply(action) {
            Rc::new(new)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(generation: Generation, index: usize, url: &str) -> GridAction {
        GridAction::Fill {
            generation,
            index,
            descriptor: MediaDescriptor {
                url: url.to_string(),
            },
        }
    }

    #[test]
    fn reset_creates_loading_cells() {
        let mut s = GridState::default();
        s.apply(GridAction::Reset {
            generation: 1,
            cell_count: 4,
        });
        assert_eq!(s.cells.len(), 4);
        assert_eq!(s.loading_count(), 4);
        assert!(s.cells.iter().all(|c| c.media.is_none()));
    }

    #[test]
    fn loaded_requires_media_and_happens_once() {
        let mut s = GridState::default();
        s.apply(GridAction::Reset {
            generation: 1,
            cell_count: 1,
        });
        assert!(!s.apply(GridAction::Loaded {
            generation: 1,
            index: 0
        }));
        assert!(s.cells[0].is_loading());
        assert!(s.apply(fill(1, 0, "http://x/cat.png")));
        assert!(s.cells[0].is_loading());
        assert!(s.apply(GridAction::Loaded {
            generation: 1,
            index: 0
        }));
        assert!(!s.cells[0].is_loading());
        assert!(!s.apply(GridAction::Loaded {
            generation: 1,
            index: 0
        }));
    }

    #[test]
    fn fill_sniffs_video() {
        let mut s = GridState::default();
        s.apply(GridAction::Reset {
            generation: 3,
            cell_count: 2,
        });
        s.apply(fill(3, 0, "https://random.dog/a.MP4"));
        s.apply(fill(3, 1, "https://random.dog/b.jpg"));
        assert_eq!(s.cells[0].media.as_ref().unwrap().kind, MediaKind::Video);
        assert_eq!(s.cells[1].media.as_ref().unwrap().kind, MediaKind::Image);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut s = GridState::default();
        s.apply(GridAction::Reset {
            generation: 1,
            cell_count: 2,
        });
        s.apply(GridAction::Reset {
            generation: 2,
            cell_count: 2,
        });
        assert!(!s.apply(fill(1, 0, "http://x/old.png")));
        assert!(s.cells[0].media.is_none());
    }

    #[test]
    fn out_of_range_and_abandoned_cells_are_untouched() {
        let mut s = GridState::default();
        s.apply(GridAction::Reset {
            generation: 1,
            cell_count: 1,
        });
        assert!(!s.apply(fill(1, 5, "http://x/a.png")));
        assert!(s.apply(GridAction::Abandon {
            generation: 1,
            index: 0,
            reason: "boom".to_string()
        }));
        assert!(!s.apply(fill(1, 0, "http://x/a.png")));
        assert!(s.cells[0].is_loading());
        assert_eq!(s.abandoned_count(), 1);
        assert_eq!(s.cells[0].failure(), Some("boom"));
    }

    #[test]
    fn reduce_keeps_rc_on_noop() {
        let s = Rc::new(GridState::default());
        let out = s.clone().reduce(GridAction::Loaded {
            generation: 9,
            index: 0,
        });
        assert!(Rc::ptr_eq(&s, &out));
    }
}
