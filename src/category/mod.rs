//! Categories label income, expenses and savings goals.

mod db;
mod domain;
mod handlers;

pub use db::{create_category, create_category_table, get_all_categories};
pub use domain::{Category, CategoryId, CategoryName};
pub use handlers::{
    create_category_endpoint, delete_category_endpoint, list_categories_endpoint,
    update_category_endpoint,
};
