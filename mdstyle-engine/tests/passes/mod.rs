mod code_block;
mod inline;
mod lists;
mod normalize;
