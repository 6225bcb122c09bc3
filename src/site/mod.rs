pub mod contact;
pub mod counter;
pub mod effects;
pub mod loading;
pub mod nav;
pub mod reveal;
pub mod theme;
pub mod toast;
