use cli_table::Table;
use log::{debug, info};

use crate::config::Config;
use crate::output::StreetWriter;
use crate::region::Province;
use crate::session::Session;
use crate::Result;

#[derive(Debug, Default, Clone, PartialEq, Table)]
pub struct ProvinceSummary {
    #[table(title = "Province")]
    pub name: String,
    #[table(title = "Counties")]
    pub counties: usize,
    #[table(title = "Municipalities")]
    pub municipalities: usize,
    #[table(title = "Cities")]
    pub cities: usize,
    #[table(title = "Streets")]
    pub streets: usize,
    #[table(title = "Files")]
    pub files: usize,
}

#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub provinces: Vec<ProvinceSummary>,
}

impl CrawlSummary {
    pub fn total_streets(&self) -> usize {
        self.provinces.iter().map(|p| p.streets).sum()
    }
}

/// Walks every province, county, municipality and city in turn and writes their streets.
pub async fn crawl(session: &Session, writer: &mut StreetWriter) -> Result<CrawlSummary> {
    let provinces = session.provinces().await?;
    info!("Provinces: {}", provinces.len());

    let mut summary = CrawlSummary::default();
    for province in provinces {
        let province_summary = crawl_province(session, writer, &province).await?;
        info!(
            "{}: {} cities, {} streets",
            province_summary.name, province_summary.cities, province_summary.streets
        );
        summary.provinces.push(province_summary);
    }

    Ok(summary)
}

async fn crawl_province(
    session: &Session,
    writer: &mut StreetWriter,
    province: &Province,
) -> Result<ProvinceSummary> {
    let mut stats = ProvinceSummary {
        name: province.name.clone(),
        ..Default::default()
    };
    let files_before = writer.files_written();

    for county in session.counties(province).await? {
        debug!("{} / {}", province.name, county.name);
        stats.counties += 1;

        for municipality in session.municipalities(province, &county).await? {
            debug!("{} / {} / {}", province.name, county.name, municipality.name);
            stats.municipalities += 1;

            for city in session.cities(province, &county, &municipality).await? {
                stats.cities += 1;

                let streets = session.streets(&city).await?;
                debug!("{} ({}): {} street(s)", city.name, city.code, streets.len());

                if writer
                    .write_city(&province.name, &city.name, &streets)?
                    .is_some()
                {
                    stats.streets += streets.len();
                }
            }
        }
    }

    // paths include the province, so every new file belongs to it
    stats.files = writer.files_written() - files_before;
    Ok(stats)
}

/// Logs in and crawls the whole registry into `config.output_root`.
pub async fn run(config: &Config) -> Result<CrawlSummary> {
    let session = Session::open(config).await?;
    let mut writer = StreetWriter::new(&config.output_root);
    crawl(&session, &mut writer).await
}
