//! Command implementations.

pub mod quarters;
pub mod render;
pub mod summary;
pub mod unmatched;

pub use self::quarters::execute_quarters;
pub use self::render::{execute_render, write_map};
pub use self::summary::execute_summary;
pub use self::unmatched::execute_unmatched;

#[cfg(test)]
pub(crate) mod test_support {
    use robomapa_engine::{DataConfig, Engine};
    use std::fs;
    use tempfile::TempDir;

    const ZONES: &str = "\
,NOMASEN,CP,geometry
0,\"['CENTRO']\",37000,\"POLYGON((-101.69 21.11, -101.68 21.11, -101.68 21.12, -101.69 21.12, -101.69 21.11))\"
1,\"['SAN JUAN']\",37530,\"POLYGON((-101.65 21.10, -101.64 21.10, -101.64 21.11, -101.65 21.11, -101.65 21.10))\"
";

    const INCIDENTS: &str = "\
CP,COLONIA,RACH,RAN,RAT,RDV,RCV,RACH,RAN,RAT,RDV,RCV,FECHA
37000,CENTRO,1,0,0,0,0,2,0,0,0,0,2023-02-01
37000,CENTRO SUR,5,0,0,0,0,0,0,0,0,0,2023-02-03
";

    /// Engine over a two-zone layer with an ENE-MAR report in CSV form
    pub fn fixture_engine() -> (TempDir, Engine) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("final-df-Leon.csv"), ZONES).unwrap();
        fs::write(dir.path().join("Incidencias-ENE-MAR.csv"), INCIDENTS).unwrap();
        let data = DataConfig {
            incident_pattern: "Incidencias-{quarter}.csv".to_string(),
            ..DataConfig::in_dir(dir.path())
        };
        let engine = Engine::open(data).unwrap();
        (dir, engine)
    }
}
