//! Transcript sources: where the text handed to the extractor comes from.

mod command;
mod file;

pub use command::CommandSource;
pub use file::FileSource;

use std::future::Future;

use crate::error::SourceError;

/// Produces a transcript for a query.
///
/// This is the only stage of the pipeline allowed to fail hard.
pub trait TranscriptSource {
    fn fetch(&self, query: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Instruction sent to a browsing agent for `address`.
///
/// The agent is asked to finish with the terminal block the structured
/// extractor recognises.
pub fn build_instruction(address: &str) -> String {
    format!(
        "Task: compute the PVGIS solar potential for {address}\n\
         \n\
         Steps:\n\
         1. Open a web browser\n\
         2. Go to https://re.jrc.ec.europa.eu/pvg_tools/en/\n\
         3. Type \"{address}\" in the Address field and click Go!\n\
         4. Wait for the map to center on the location and note its coordinates\n\
         5. In the PV panel keep the defaults: crystalline silicon, 1 kWp installed peak power, 14% system loss\n\
         6. Click \"Visualize results\"\n\
         7. In \"Simulation outputs\" read:\n\
         \x20  - \"Yearly PV energy production [kWh]\"\n\
         \x20  - \"Yearly in-plane irradiation [kWh/m²]\"\n\
         \n\
         IMPORTANT: end your answer with exactly this block:\n\
         EXTRACTED DATA:\n\
         Coordinates: [latitude], [longitude]\n\
         Production: [value] kWh\n\
         Irradiation: [value] kWh/m²\n\
         \n\
         Replace each placeholder with the exact figures found (e.g. 1696.92).\n"
    )
}
