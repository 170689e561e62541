mod idw;
mod synthetic;
