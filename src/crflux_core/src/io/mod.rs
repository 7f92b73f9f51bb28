//! File IO related tools
//!
//! Models and tables are stored with bincode, using the legacy configuration so that
//! files stay readable across versions of this crate.

use crate::errors::{CrfluxResult, Error};
use bincode::serde::{decode_from_std_read, encode_into_std_write};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Support for automatic derivation of Save/Load
pub trait FileIO: Serialize
where
    for<'de> Self: Deserialize<'de>,
{
    /// Save into a file, returning the number of bytes written.
    fn save<P: AsRef<Path>>(&self, filename: P) -> CrfluxResult<usize> {
        let mut f = BufWriter::new(File::create(filename)?);
        encode_into_std_write(self, &mut f, bincode::config::legacy())
            .map_err(|_| Error::IOError("Failed to write to file".into()))
    }

    /// Load from a file.
    fn load<P: AsRef<Path>>(filename: P) -> CrfluxResult<Self> {
        let mut f = BufReader::new(File::open(filename)?);
        decode_from_std_read(&mut f, bincode::config::legacy())
            .map_err(|_| Error::IOError("Failed to read from file".into()))
    }

    /// Save a vector of this object.
    fn save_vec<P: AsRef<Path>>(vec: &[Self], filename: P) -> CrfluxResult<()> {
        let mut f = BufWriter::new(File::create(filename)?);

        let _ = encode_into_std_write(vec, &mut f, bincode::config::legacy())
            .map_err(|_| Error::IOError("Failed to write to file".into()))?;
        Ok(())
    }

    /// load a vector of this object.
    fn load_vec<P: AsRef<Path>>(filename: P) -> CrfluxResult<Vec<Self>> {
        let mut f = BufReader::new(File::open(filename)?);

        let res: Vec<Self> = decode_from_std_read(&mut f, bincode::config::legacy())
            .map_err(|_| Error::IOError("Failed to load from file".into()))?;
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::{FluxModel, GaisserHonda, HgVariant, HillasGaisser2012};
    use crate::species::Nucleus;

    #[test]
    fn test_model_round_trip() {
        let dir = std::env::temp_dir().join("crflux_io_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("h4a.bin");

        let model = HillasGaisser2012::new(HgVariant::H4a);
        let written = model.save(&path).unwrap();
        assert!(written > 0);
        let loaded = HillasGaisser2012::load(&path).unwrap();
        assert_eq!(model, loaded);
        assert_eq!(
            model.nucleus_flux(Nucleus::IRON, 1e6).unwrap(),
            loaded.nucleus_flux(Nucleus::IRON, 1e6).unwrap()
        );

        let path = dir.join("gh_vec.bin");
        GaisserHonda::save_vec(&[GaisserHonda::new(), GaisserHonda::new()], &path).unwrap();
        assert_eq!(GaisserHonda::load_vec(&path).unwrap().len(), 2);

        assert!(GaisserHonda::load(dir.join("missing.bin")).is_err());
    }
}
