pub mod sgdml;
