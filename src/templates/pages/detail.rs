use crate::domain::Listing;
use crate::templates::components::{category_chip, rating, verification_badge};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn detail_page(listing: &Listing) -> Markup {
    let l = listing;
    let maps_link = format!(
        "https://www.google.com/maps/search/?api=1&query={},{}&query_place_id={}",
        l.coordinates.lat, l.coordinates.lng, l.id
    );

    desktop_layout(
        &l.name,
        false,
        html! {
            main class="detail" {
                p { a href="/" { "← Back to the map" } }

                @if let Some(image) = l.images.first() {
                    img class="hero" src=(image) alt=(l.name);
                }

                h1 { (l.name) }
                div class="listing-meta" {
                    (category_chip(l))
                    (verification_badge(l))
                    (rating(l))
                }
                p class="muted" { (l.address) }

                @if let Some(writeup) = &l.writeup {
                    section class="card" {
                        p { (writeup) }
                    }
                }

                section class="card" {
                    h3 { "Details" }
                    dl {
                        @if let Some(policy) = &l.pet_policy {
                            dt { "Pet policy" }
                            dd { (policy) }
                        }
                        @if let Some(hours) = &l.hours {
                            dt { "Opening hours" }
                            dd class="hours" { (hours) }
                        }
                        @if let Some(price) = &l.price_range {
                            dt { "Price" }
                            dd { (price) }
                        }
                        @if let Some(phone) = &l.phone {
                            dt { "Phone" }
                            dd { a href=(format!("tel:{}", phone.replace(' ', ""))) { (phone) } }
                        }
                        @if let Some(site) = &l.website {
                            dt { "Website" }
                            dd { a href=(site) rel="noopener" target="_blank" { (site) } }
                        }
                    }
                    @if let Some(note) = &l.note {
                        p class="note" { (note) }
                    }
                }

                @if l.images.len() > 1 {
                    section class="gallery" {
                        @for image in l.images.iter().skip(1) {
                            img src=(image) alt=(l.name) loading="lazy";
                        }
                    }
                }

                p {
                    a class="primary" href=(maps_link) target="_blank" rel="noopener" { "Open in Google Maps" }
                }
            }
        },
    )
}
