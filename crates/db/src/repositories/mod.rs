//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod api_quota_repo;
pub mod corporate_content_repo;
pub mod device_repo;
pub mod exhibition_log_repo;
pub mod media_item_repo;
pub mod operating_window_repo;
pub mod playlist_repo;
pub mod qr_click_repo;
pub mod schedule_binding_repo;
pub mod venue_repo;

pub use api_quota_repo::ApiQuotaRepo;
pub use corporate_content_repo::CorporateContentRepo;
pub use device_repo::DeviceRepo;
pub use exhibition_log_repo::ExhibitionLogRepo;
pub use media_item_repo::MediaItemRepo;
pub use operating_window_repo::OperatingWindowRepo;
pub use playlist_repo::PlaylistRepo;
pub use qr_click_repo::QrClickRepo;
pub use schedule_binding_repo::ScheduleBindingRepo;
pub use venue_repo::VenueRepo;
