pub mod raindrop;
