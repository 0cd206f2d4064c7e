//! Service Layer
//!
//! One service per domain concern, each a cheap-to-clone handle over the
//! shared pool. Handlers resolve the department first and pass it down;
//! services enforce ownership on every id they touch.

pub mod notification;
pub mod order;
pub mod reservation;
pub mod session;
pub mod settings;
pub mod sms;
pub mod table;

pub use notification::{BusEvent, NotificationService};
pub use order::OrderService;
pub use reservation::ReservationService;
pub use session::SessionService;
pub use settings::SettingsService;
pub use sms::SmsService;
pub use table::TableService;
