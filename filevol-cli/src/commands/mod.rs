pub mod capabilities;
pub mod create;
pub mod info;
pub mod inspect;
pub mod list;
pub mod mount;
pub mod path;
pub mod rm;
pub mod unmount;
