mod app_shell;
mod builder;
