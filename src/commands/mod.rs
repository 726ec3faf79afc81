pub mod cases;
pub mod login;
pub mod seed;
pub mod storage;
