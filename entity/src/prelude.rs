pub use super::item::Entity as Item;
