use maud::{html, Markup, DOCTYPE};

use crate::summary::ClimateSummary;

/// Routes listed on the welcome page, with a short description of each
pub const ROUTES: [(&str, &str); 7] = [
    (
        "/Resources/hawaii.sqlite",
        "precipitation for the last 12 months of data (legacy path)",
    ),
    (
        "/api/v1.0/precipitation",
        "precipitation for the last 12 months of data",
    ),
    ("/api/v1.0/stations", "station ids"),
    (
        "/api/v1.0/tobs",
        "temperature observations of the most active station for the last 12 months of data",
    ),
    (
        "/api/v1.0/<start>",
        "lowest, highest and average temperature from start (yyyy-mm-dd)",
    ),
    (
        "/api/v1.0/<start>/<end>",
        "lowest, highest and average temperature between start and end (yyyy-mm-dd)",
    ),
    ("/docs", "API documentation"),
];

pub fn home_page(summary: &ClimateSummary) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Climate API" }
            }
            body {
                h1 { "Welcome, the available routes are the following" }
                ul {
                    @for (route, description) in ROUTES {
                        li {
                            code { (route) }
                            " - " (description)
                        }
                    }
                }
                p {
                    "Observations run up to " (summary.most_recent_date.to_string())
                    ", the 12 month window starts " (summary.cutoff_date.to_string())
                    ". Most active station: " (summary.active_station) "."
                }
            }
        }
    }
}
