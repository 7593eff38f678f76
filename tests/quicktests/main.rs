mod bst;
mod list;
mod nary;
