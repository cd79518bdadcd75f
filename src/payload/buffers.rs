use crate::video::{MAX_SPATIAL_LAYERS, MAX_TEMPORAL_LAYERS, VP8_NUM_BUFFERS};

/// A (spatial, temporal) layer pair. Orders spatial major.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId {
    /// Spatial layer index.
    pub spatial_idx: usize,
    /// Temporal layer index.
    pub temporal_idx: usize,
}

impl LayerId {
    /// Creates a layer id.
    pub fn new(spatial_idx: usize, temporal_idx: usize) -> Self {
        LayerId {
            spatial_idx,
            temporal_idx,
        }
    }
}

/// Last shared frame id that updated each codec reference buffer.
///
/// `None` means the buffer has not been written since the last reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BufferReferenceTable {
    frame_ids: [Option<i64>; VP8_NUM_BUFFERS],
}

impl BufferReferenceTable {
    pub fn get(&self, buffer: usize) -> Option<i64> {
        self.frame_ids.get(buffer).copied().flatten()
    }

    pub fn update(&mut self, buffer: usize, frame_id: i64) {
        if let Some(slot) = self.frame_ids.get_mut(buffer) {
            *slot = Some(frame_id);
        }
    }

    /// Points every buffer at `frame_id`.
    pub fn fill(&mut self, frame_id: i64) {
        self.frame_ids = [Some(frame_id); VP8_NUM_BUFFERS];
    }
}

/// Last shared frame id per layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LayerFrameIds {
    frame_ids: [[Option<i64>; MAX_TEMPORAL_LAYERS]; MAX_SPATIAL_LAYERS],
}

impl LayerFrameIds {
    pub fn get(&self, layer: LayerId) -> Option<i64> {
        self.frame_ids
            .get(layer.spatial_idx)
            .and_then(|t| t.get(layer.temporal_idx))
            .copied()
            .flatten()
    }

    pub fn update(&mut self, layer: LayerId, frame_id: i64) {
        let slot = self
            .frame_ids
            .get_mut(layer.spatial_idx)
            .and_then(|t| t.get_mut(layer.temporal_idx));

        if let Some(slot) = slot {
            *slot = Some(frame_id);
        }
    }

    /// Forgets all temporal layers of a spatial layer.
    pub fn clear_spatial(&mut self, spatial_idx: usize) {
        if let Some(t) = self.frame_ids.get_mut(spatial_idx) {
            *t = [None; MAX_TEMPORAL_LAYERS];
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn layer_id_orders_spatial_major() {
        assert!(LayerId::new(0, 3) < LayerId::new(1, 0));
        assert!(LayerId::new(1, 0) < LayerId::new(1, 1));
    }

    #[test]
    fn buffer_table_overwrites() {
        let mut t = BufferReferenceTable::default();
        assert_eq!(t.get(0), None);
        t.update(0, 4);
        t.update(0, 7);
        assert_eq!(t.get(0), Some(7));
        assert_eq!(t.get(1), None);
        // Out of range slots are never written.
        t.update(VP8_NUM_BUFFERS, 1);
        assert_eq!(t.get(VP8_NUM_BUFFERS), None);
    }

    #[test]
    fn buffer_table_fill() {
        let mut t = BufferReferenceTable::default();
        t.fill(10);
        assert!((0..VP8_NUM_BUFFERS).all(|i| t.get(i) == Some(10)));
    }

    #[test]
    fn layer_ids_clear_spatial() {
        let mut l = LayerFrameIds::default();
        l.update(LayerId::new(0, 1), 5);
        l.update(LayerId::new(1, 1), 6);
        l.clear_spatial(0);
        assert_eq!(l.get(LayerId::new(0, 1)), None);
        assert_eq!(l.get(LayerId::new(1, 1)), Some(6));
        assert_eq!(l.get(LayerId::new(0, MAX_TEMPORAL_LAYERS)), None);
    }
}
