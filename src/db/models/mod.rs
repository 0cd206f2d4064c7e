//! Database models and request payloads

pub mod department;
pub mod dining_table;
pub mod guest_session;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod settings;

pub use department::Department;
pub use dining_table::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableLayoutItem, TableLayoutRequest,
};
pub use guest_session::{
    AssignTableRequest, GuestSession, SessionStatus, SessionType, StartSessionRequest,
};
pub use menu::Menu;
pub use order::{
    Order, OrderCreateRequest, OrderDto, OrderItem, OrderItemRequest, OrderStatus,
    OrderUpdateRequest, PaymentStatus, SendReceiptRequest,
};
pub use reservation::{
    Reservation, ReservationCreateRequest, ReservationStatus, ReservationStatusRequest,
};
pub use settings::{DepartmentSettings, DiscountRule, PricingSettings, SmsSettings};
