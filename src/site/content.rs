//! Marketing content: the services offered and the blog

use serde::Serialize;

/// A service line shown on the home and services pages
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub slug: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub details: &'static [&'static str],
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub author: &'static str,
    pub summary: &'static str,
    pub body: &'static [&'static str],
}

pub const SERVICES: &[Service] = &[
    Service {
        slug: "fleet-fueling",
        name: "Fleet Fueling",
        summary: "Overnight wet-hosing for trucks, vans, and service vehicles parked at your yard.",
        details: &[
            "Scheduled nightly or weekly routes",
            "Per-vehicle gallon reporting",
            "No detours to the pump for your drivers",
        ],
    },
    Service {
        slug: "bulk-delivery",
        name: "Bulk Fuel Delivery",
        summary: "Diesel and gasoline delivered to on-site tanks from 500 gallons up.",
        details: &[
            "Tank monitoring and automatic refills",
            "Clear and dyed diesel",
            "DEF delivery on the same route",
        ],
    },
    Service {
        slug: "construction",
        name: "Construction & Equipment",
        summary: "Jobsite fueling for generators, excavators, and heavy equipment.",
        details: &[
            "Early-morning delivery before crews start",
            "Equipment-level usage tracking",
            "Emergency call-outs",
        ],
    },
    Service {
        slug: "generators",
        name: "Generator Support",
        summary: "Standby generator top-offs for hospitals, data centers, and storm response.",
        details: &[
            "Priority scheduling during outages",
            "Fuel polishing and testing",
            "24/7 dispatch line",
        ],
    },
];

pub const POSTS: &[Post] = &[
    Post {
        slug: "why-mobile-fueling",
        title: "Why fleets are switching to mobile fueling",
        date: "2024-03-12",
        author: "Nevloh Team",
        summary: "Every trip to the pump is paid driver time. Here is what that adds up to.",
        body: &[
            "A ten-truck fleet that stops for fuel twice a week spends roughly forty driver-hours a month at the pump.",
            "Mobile fueling moves that work overnight, when vehicles are parked and nobody is on the clock.",
            "The result is more billable hours, fewer fuel card surprises, and a clean per-vehicle usage report.",
        ],
    },
    Post {
        slug: "diesel-storage-tips",
        title: "Five tips for storing diesel on site",
        date: "2024-05-02",
        author: "Operations",
        summary: "Keep your bulk tank clean, dry, and ready for the next cold snap.",
        body: &[
            "Keep tanks at least three-quarters full to limit condensation.",
            "Test for water and microbial growth every quarter.",
            "Use a winter blend or additive once temperatures drop below freezing.",
            "Log every delivery so shrinkage shows up early.",
            "Schedule automatic refills so you are never running on the reserve.",
        ],
    },
    Post {
        slug: "storm-season-readiness",
        title: "Storm season readiness for standby generators",
        date: "2024-06-18",
        author: "Dispatch",
        summary: "Outages are not the time to discover an empty generator tank.",
        body: &[
            "Book a top-off before the season starts and confirm your tank gauges read correctly.",
            "Agree on a priority delivery window with your supplier ahead of time.",
            "Run your generator under load monthly so stale fuel gets used.",
        ],
    },
];

/// Look up a blog post by slug
pub fn find_post(slug: &str) -> Option<&'static Post> {
    POSTS.iter().find(|post| post.slug == slug)
}

/// Look up a service by slug
pub fn find_service(slug: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|service| service.slug == slug)
}
