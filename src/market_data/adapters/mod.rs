pub mod magiceden;
