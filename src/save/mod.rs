mod bnd4;
#[cfg(test)]
pub(crate) use bnd4::fixture as bnd4_fixture;
mod console;
mod platform;
mod userdata;

pub use bnd4::decrypt_sl2;
pub use console::split_console_dat;
pub use platform::Platform;
pub use userdata::UserData;
