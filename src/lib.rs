pub mod api;
pub mod app;
pub mod render;
pub mod topo;

#[cfg(test)]
mod test;
