mod parameters;
mod schemas;
mod support;
mod type_resolution;
