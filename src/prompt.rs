//! Prompt assembly

/// Build the instruction sent to the image model.
///
/// With a reference image the product is taken from the image, so the free-text
/// description is left out and the model is asked to keep the product intact.
pub fn build_prompt(
    description: &str,
    model_fragment: &str,
    vibe_fragment: &str,
    has_reference_image: bool,
) -> String {
    if has_reference_image {
        format!(
            "Using the product from the provided image, create a new scene. \
             The scene must be a professional TikTok affiliate marketing photograph, ultra-realistic, with cinematic lighting. \
             It must feature a {model_fragment} showcasing the product. \
             The overall atmosphere and style is {vibe_fragment}. \
             The product from the image should be the main focus, seamlessly integrated, clearly visible, and appealing. \
             Ensure the final image is in a vertical 9:16 aspect ratio, highly detailed, and 8k resolution."
        )
    } else {
        format!(
            "A professional TikTok affiliate marketing photograph, ultra-realistic, cinematic lighting. \
             The image features a {model_fragment} showcasing a {description}. \
             The overall atmosphere and style is {vibe_fragment}. \
             The product is the main focus, clearly visible and appealing. \
             Shot in a vertical 9:16 aspect ratio. High detail, 8k resolution."
        )
    }
}
