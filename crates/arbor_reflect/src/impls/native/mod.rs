mod array;
mod primitive;
mod text;
