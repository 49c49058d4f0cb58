//! Locate command - geocode an address for the config file.

use clap::Args;

use flyover::coord::Coordinate;
use flyover::geocode::{
    default_geocode_policy, geocode_with_retry, NominatimGeocoder, DEFAULT_NOMINATIM_URL,
};
use flyover::http::ReqwestClient;
use flyover::shutdown::ThreadSleeper;

use crate::error::CliError;
use crate::runner::init_console_logging;

/// Arguments for the locate command.
#[derive(Debug, Clone, Args)]
pub struct LocateArgs {
    /// Street address or place name
    pub address: String,

    /// Nominatim base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_NOMINATIM_URL)]
    pub geocoder_url: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Run the locate command.
pub fn run(args: LocateArgs) -> Result<(), CliError> {
    let _logging = init_console_logging(args.debug)?;

    let client = ReqwestClient::new()?;
    let geocoder = NominatimGeocoder::with_base_url(&client, args.geocoder_url);
    let coord = geocode_with_retry(
        &geocoder,
        &args.address,
        &default_geocode_policy(),
        &ThreadSleeper,
    )?;

    print!("{}", format_location(&coord));
    Ok(())
}

/// Coordinates plus a ready-to-paste config snippet.
fn format_location(coord: &Coordinate) -> String {
    format!(
        "{:.6}, {:.6}\n\nlocation:\n  lat: {:.6}\n  lon: {:.6}\n",
        coord.latitude, coord.longitude, coord.latitude, coord.longitude
    )
}
