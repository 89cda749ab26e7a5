//! Command implementations.

pub mod create;
pub mod delete;
pub mod favorite;
pub mod list;
pub mod profile;
pub mod show;
pub mod suggest;

pub use self::create::execute_create;
pub use self::delete::execute_delete;
pub use self::favorite::execute_favorite;
pub use self::list::execute_list;
pub use self::profile::execute_profile;
pub use self::show::execute_show;
pub use self::suggest::execute_suggest;
