//! Reload graphs and embeddings, dump distance matrices

pub mod csv;

pub mod dataset;

pub mod graphml;

pub mod output;
