pub mod project_filters;
