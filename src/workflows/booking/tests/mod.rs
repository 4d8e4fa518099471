mod availability;
mod common;
mod routing;
