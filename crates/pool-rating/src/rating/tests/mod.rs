mod badges;
mod common;
mod routing;
