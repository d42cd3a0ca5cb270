/// Shared buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Instances: max_instances × 28 floats]
/// [Points: max_points × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSLUCENT_SPLIT: usize = 4;
pub const HEADER_MAX_POINTS: usize = 5;
pub const HEADER_POINT_COUNT: usize = 6;
pub const HEADER_POINT_SIZE: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_VIEWPORT_WIDTH: usize = 10;
pub const HEADER_VIEWPORT_HEIGHT: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section: view-projection matrix + eye.
pub const CAMERA_FLOATS: usize = 20;

/// Floats per mesh instance (wire format: never changes).
pub const INSTANCE_FLOATS: usize = 28;

/// Floats per point: x, y, z, r, g, b (wire format: never changes).
pub const POINT_FLOATS: usize = 6;

/// Floats per game event: kind, a, b, c (wire format: never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_points: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub point_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where the camera uniform begins.
    pub camera_offset: usize,
    pub instance_data_offset: usize,
    pub point_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_points: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let point_data_floats = max_points * POINT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let point_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = point_data_offset + point_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_points,
            max_events,
            instance_data_floats,
            point_data_floats,
            event_data_floats,
            camera_offset,
            instance_data_offset,
            point_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_points, config.max_events)
    }

    /// Header values known at init (capacities, viewport, version).
    pub fn write_static_header(&self, config: &GameConfig, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_MAX_POINTS] = self.max_points as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_VIEWPORT_WIDTH] = config.viewport_width;
        header[HEADER_VIEWPORT_HEIGHT] = config.viewport_height;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}
