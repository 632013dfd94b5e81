mod molecule;
mod mrna;
mod polymer;
mod protein;
mod ribo;
