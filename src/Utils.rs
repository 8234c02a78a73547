/// loading of mechanism files (CHEMKIN text or JSON) into reaction records, units and NASA polynomials
pub mod load_from_file;
