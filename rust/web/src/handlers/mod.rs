pub mod game;
pub mod health;
pub mod settings;
pub mod sse;

pub use game::{
    attach_seat, create_table, detach_seat, snapshot, start_hand, submit_action,
    AttachSeatRequest, CreateTableRequest, CreateTableResponse, DetachSeatResponse,
};
pub use health::health;
pub use settings::{get_settings, reset_settings, update_settings, UpdateSettingsRequest};
pub use sse::{stream_settlements, stream_state};
