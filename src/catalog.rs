//! Static persona and vibe choices offered by the form

use serde::Serialize;

/// A selectable choice: a model persona or a visual vibe
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub id: &'static str,
    pub name: &'static str,
    /// Thumbnail shown next to the choice
    pub image: &'static str,
    /// Fragment spliced into the generation prompt
    pub prompt: &'static str,
}

pub static MODELS: [CatalogOption; 5] = [
    CatalogOption {
        id: "female-asian",
        name: "Asian Woman",
        image: "https://picsum.photos/seed/model1/300/400",
        prompt: "a beautiful young Asian woman with a friendly smile",
    },
    CatalogOption {
        id: "male-caucasian",
        name: "Caucasian Man",
        image: "https://picsum.photos/seed/model2/300/400",
        prompt: "a handsome young Caucasian man with a confident look",
    },
    CatalogOption {
        id: "female-black",
        name: "Black Woman",
        image: "https://picsum.photos/seed/model3/300/400",
        prompt: "a stylish young Black woman with an elegant pose",
    },
    CatalogOption {
        id: "male-hispanic",
        name: "Hispanic Man",
        image: "https://picsum.photos/seed/model4/300/400",
        prompt: "a charismatic young Hispanic man with a warm expression",
    },
    CatalogOption {
        id: "non-binary",
        name: "Androgynous Person",
        image: "https://picsum.photos/seed/model5/300/400",
        prompt: "a chic androgynous person with a modern haircut",
    },
];

pub static VIBES: [CatalogOption; 5] = [
    CatalogOption {
        id: "minimalist",
        name: "Minimalist",
        image: "https://picsum.photos/seed/vibe1/400/300",
        prompt: "clean, minimalist aesthetic with a neutral color palette, soft natural lighting, and simple, uncluttered background",
    },
    CatalogOption {
        id: "vintage",
        name: "Vintage",
        image: "https://picsum.photos/seed/vibe2/400/300",
        prompt: "a warm, vintage feel with retro colors, film grain texture, and classic, nostalgic props",
    },
    CatalogOption {
        id: "futuristic",
        name: "Futuristic",
        image: "https://picsum.photos/seed/vibe3/400/300",
        prompt: "a sleek, futuristic vibe with neon lights, metallic textures, and a dark, moody environment",
    },
    CatalogOption {
        id: "bohemian",
        name: "Bohemian",
        image: "https://picsum.photos/seed/vibe4/400/300",
        prompt: "a free-spirited bohemian style, with earthy tones, natural elements like plants, and soft, warm sunlight",
    },
    CatalogOption {
        id: "luxury",
        name: "Luxury",
        image: "https://picsum.photos/seed/vibe5/400/300",
        prompt: "an opulent and luxurious setting, featuring rich textures like marble and velvet, elegant decor, and sophisticated lighting",
    },
];

/// Look up a model persona by id
pub fn find_model(id: &str) -> Option<&'static CatalogOption> {
    MODELS.iter().find(|option| option.id == id)
}

/// Look up a vibe by id
pub fn find_vibe(id: &str) -> Option<&'static CatalogOption> {
    VIBES.iter().find(|option| option.id == id)
}
