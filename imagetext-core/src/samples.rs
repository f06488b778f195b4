//! The curated demo catalog: sample images, the canned text the demo
//! extractor returns for each of them, and sample generation prompts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleImage {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SAMPLE_HANDWRITTEN_NOTE: &str = "Handwritten Note";
pub const SAMPLE_BOOK_PAGE: &str = "Book Page";
pub const SAMPLE_PRODUCT_LABEL: &str = "Product Label";

pub fn sample_images() -> Vec<SampleImage> {
    vec![
        SampleImage {
            name: SAMPLE_HANDWRITTEN_NOTE,
            url: "https://images.unsplash.com/photo-1527168027773-0cc890c4f42e?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
        },
        SampleImage {
            name: SAMPLE_BOOK_PAGE,
            url: "https://images.unsplash.com/photo-1588666309990-d68f08e3d4a6?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
        },
        SampleImage {
            name: SAMPLE_PRODUCT_LABEL,
            url: "https://images.unsplash.com/photo-1577563908411-5077b6dc7624?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
        },
    ]
}

pub fn find_sample(name: &str) -> Option<SampleImage> {
    sample_images().into_iter().find(|s| s.name == name)
}

/// Canned extraction output for the curated samples.
pub fn canned_extraction_text(sample_name: &str) -> Option<&'static str> {
    match sample_name {
        SAMPLE_HANDWRITTEN_NOTE => Some(
            "Dear Sarah,\n\nI wanted to thank you for the wonderful gift. It really made my day special. Looking forward to seeing you next weekend.\n\nBest wishes,\nEmily",
        ),
        SAMPLE_BOOK_PAGE => Some(
            "The ship lay in the bay at dusk, its silhouette a stark contrast against the fading light. Captain James surveyed the horizon, knowing the storm would arrive by morning. The crew worked silently, preparing for the long night ahead.",
        ),
        SAMPLE_PRODUCT_LABEL => Some(
            "ORGANIC HONEY\nPure Raw Unfiltered\nNet Wt. 16 oz (454g)\n\nIngredients: 100% Pure Organic Honey\nStore at room temperature\nProduced and packed in California\nBest before: See bottom of jar",
        ),
        _ => None,
    }
}

/// What the demo extractor says about an image it has never seen.
pub const GENERIC_UPLOAD_TEXT: &str = "This is the extracted text from your uploaded image. The AI has processed the content and converted it to editable format. You can now copy, edit, or download this text.";

/// Shown when a known sample somehow has no canned text.
pub const FALLBACK_EXTRACTION_TEXT: &str = "Text extracted successfully from the image.";

pub fn sample_prompts() -> Vec<&'static str> {
    vec![
        "A futuristic cityscape with flying cars and neon lights",
        "A serene mountain landscape at sunset with a lake reflection",
        "An astronaut riding a horse on Mars, digital art",
        "A magical forest with glowing mushrooms and fairies",
    ]
}
