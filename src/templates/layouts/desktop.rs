use maud::{html, Markup, DOCTYPE};

pub const MAPBOX_GL_VERSION: &str = "3.4.0";

pub fn desktop_layout(title: &str, with_map: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Dog-Friendly Singapore" }
                link rel="stylesheet" href="/static/main.css";
                @if with_map {
                    link rel="stylesheet"
                        href=(format!("https://api.mapbox.com/mapbox-gl-js/v{MAPBOX_GL_VERSION}/mapbox-gl.css"));
                    script src=(format!("https://api.mapbox.com/mapbox-gl-js/v{MAPBOX_GL_VERSION}/mapbox-gl.js")) defer {};
                }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
                script src="/static/app.js" defer {};
            }
            body {
                header class="site-header" {
                    a href="/" class="brand" {
                        // Paw print
                        svg
                            xmlns="http://www.w3.org/2000/svg"
                            width="24"
                            height="24"
                            viewBox="0 0 24 24"
                            fill="currentColor"
                            aria-hidden="true"
                        {
                            circle cx="5" cy="9" r="2.2" {}
                            circle cx="9.5" cy="5" r="2.2" {}
                            circle cx="14.5" cy="5" r="2.2" {}
                            circle cx="19" cy="9" r="2.2" {}
                            path d="M12 10c-3.5 0-6.5 4.2-6.5 7 0 2 1.6 3 3.4 3 1.3 0 2-.6 3.1-.6s1.8.6 3.1.6c1.8 0 3.4-1 3.4-3 0-2.8-3-7-6.5-7z" {}
                        }
                        span { "Dog-Friendly Singapore" }
                    }
                    nav {
                        ul {
                            li { a href="/" { "Map" } }
                            li { a href="/export.xlsx" { "Download" } }
                        }
                    }
                }
                (content)
                footer class="site-footer" {
                    p { "Places are collected from public listings and checked against reviews. Always call ahead before bringing your dog." }
                }
            }
        }
    }
}
