pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod laporan;
pub mod program;
pub mod transactions;
pub mod umkm;
pub mod uploads;
pub mod users;
pub mod wisata;
