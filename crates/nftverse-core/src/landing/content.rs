//! Static copy shown on the landing view

pub const HERO_BADGE: &str = "Welcome to the Future of Digital Art";
pub const HERO_TITLE: &str = "Discover, collect, and sell extraordinary NFTs";
pub const HERO_SUBTITLE: &str = "NFTverse is the world's first and largest NFT marketplace";
/// Call-to-action leading to the marketplace
pub const HERO_CTA: &str = "Explore";
pub const HERO_SECONDARY: &str = "Create";

pub const FEATURED_HEADING: &str = "Featured Collections";
pub const BENEFITS_HEADING: &str = "Why Choose NFTverse?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
}

pub const STATS: [Stat; 3] = [
    Stat {
        label: "Active Users",
        value: "50K+",
    },
    Stat {
        label: "Total Volume",
        value: "$100M+",
    },
    Stat {
        label: "NFTs Created",
        value: "1M+",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
}

pub const BENEFITS: [Benefit; 4] = [
    Benefit {
        title: "Secure Platform",
        description: "Advanced security measures to protect your digital assets and transactions",
    },
    Benefit {
        title: "Lightning Fast",
        description: "Quick transactions and seamless trading experience on the Ethereum network",
    },
    Benefit {
        title: "Exclusive NFTs",
        description: "Access to unique and rare digital collectibles from top creators",
    },
    Benefit {
        title: "Low Fees",
        description: "Competitive transaction fees to maximize your trading profits",
    },
];

/// Carousel entry on the landing view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedItem {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub price: &'static str,
    pub creator: &'static str,
}

pub const FEATURED: [FeaturedItem; 5] = [
    FeaturedItem {
        id: "featured-1",
        name: "Cosmic Perspective",
        image: "https://images.unsplash.com/photo-1634973357973-f2ed2657db3c",
        price: "0.85",
        creator: "CryptoArtist",
    },
    FeaturedItem {
        id: "featured-2",
        name: "Digital Dreams",
        image: "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe",
        price: "1.2",
        creator: "PixelMaster",
    },
    FeaturedItem {
        id: "featured-3",
        name: "Neon Genesis",
        image: "https://images.unsplash.com/photo-1620641788421-7a1c342ea42e",
        price: "2.5",
        creator: "NeonCreator",
    },
    FeaturedItem {
        id: "featured-4",
        name: "Abstract Harmony",
        image: "https://images.unsplash.com/photo-1614851099511-773084f6911d",
        price: "0.65",
        creator: "ArtisticSoul",
    },
    FeaturedItem {
        id: "featured-5",
        name: "Future Vision",
        image: "https://images.unsplash.com/photo-1633101585272-9b1b3b2b0c8d",
        price: "1.8",
        creator: "VisionaryArt",
    },
];
