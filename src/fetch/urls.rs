use crate::periods::ReportingPeriod;

/// Where the portal serves the daily-report archives.
pub const PORTAL_BASE: &str = "http://dados.cvm.gov.br/dados/FI/DOC/INF_DIARIO/DADOS";

/// The fund registry is a plain CSV, no archive around it.
pub const REGISTRY_URL: &str = "http://dados.cvm.gov.br/dados/FI/CAD/DADOS/cad_fi.csv";

/// Monthly single-CSV zip for a recent-scheme period.
pub fn recent_archive(base: &str, period: ReportingPeriod) -> String {
    format!(
        "{base}/inf_diario_fi_{}{:02}.zip",
        period.year, period.month
    )
}

/// Yearly multi-CSV zip for a historical-scheme year.
pub fn historical_archive(base: &str, year: i32) -> String {
    format!("{base}/HIST/inf_diario_fi_{year}.zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_are_zero_padded() {
        let url = recent_archive(PORTAL_BASE, ReportingPeriod::new(2021, 3));
        assert_eq!(
            url,
            "http://dados.cvm.gov.br/dados/FI/DOC/INF_DIARIO/DADOS/inf_diario_fi_202103.zip"
        );
    }

    #[test]
    fn yearly_archives_live_under_hist() {
        let url = historical_archive(PORTAL_BASE, 2015);
        assert_eq!(
            url,
            "http://dados.cvm.gov.br/dados/FI/DOC/INF_DIARIO/DADOS/HIST/inf_diario_fi_2015.zip"
        );
    }
}
