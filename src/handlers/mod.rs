pub mod plants;
pub mod rooms;
