mod api;
mod props;
mod suite;
