//! Restaurant prompt composition.
//!
//! The non-negotiable quality bar is identical at both levels; only the soft
//! preferences (budget, distance, dining style) are marked relaxable.

use orderly_domain::{ExpectedShape, ResolvedLocation, SuggestionRequest};

use crate::use_cases::generation::{ComposedPrompt, Strictness};

pub const MIN_RATING: &str = "4.0";
pub const MIN_REVIEWS: u32 = 100;

/// Compose the prompt for one strictness level. Never fails.
pub fn compose(
    request: &SuggestionRequest,
    location: &ResolvedLocation,
    strictness: Strictness,
) -> ComposedPrompt {
    let text = match strictness {
        Strictness::Strict => strict_text(request, location),
        Strictness::Relaxed => relaxed_text(request, location),
    };
    ComposedPrompt {
        strictness,
        text,
        shape: shape_for(request),
    }
}

pub fn shape_for(request: &SuggestionRequest) -> ExpectedShape {
    if request.include_chains() {
        ExpectedShape::WithAlternatives
    } else {
        ExpectedShape::Single
    }
}

fn chain_instruction(request: &SuggestionRequest) -> &'static str {
    if request.include_chains() {
        "Regarding chain restaurants: well-known chain restaurants are acceptable suggestions."
    } else {
        "Regarding chain restaurants: exclude well-known national or international chain \
         restaurants from the suggestions."
    }
}

fn preferences(request: &SuggestionRequest) -> String {
    format!(
        "- Dining preference: {}\n- Budget: {}\n- Distance: {}\n- {}",
        request.dining_preference_label(),
        request.budget_label(),
        request.distance_label(),
        chain_instruction(request),
    )
}

fn non_negotiables(location: &ResolvedLocation) -> String {
    format!(
        "1. The restaurant must be a real, verifiable establishment located in {location}.\n\
         2. The rating must be {MIN_RATING} or higher.\n\
         3. It must have more than {MIN_REVIEWS} reviews.\n\
         4. It must have a valid, working phone number. Do not return \"Not available\".\n\
         5. It must have an official, working, and accessible website. Verify the URL is \
         correct and not a broken link.\n\
         6. The restaurant must be open for business at the current time of this request."
    )
}

fn strict_text(request: &SuggestionRequest, location: &ResolvedLocation) -> String {
    let coordinates = request.coordinates();
    let ask = if request.include_chains() {
        "Suggest one primary restaurant that is the best match for the user's criteria. It can \
         be an independent restaurant or a chain. Also provide 2-3 alternative popular chain \
         restaurants nearby that match the cuisine."
    } else {
        "Suggest EXACTLY ONE restaurant that meets ALL of these strict criteria."
    };

    format!(
        "You are a restaurant recommendation assistant.\n\
         A user is located at latitude {lat}, longitude {lng}, which is in {location}.\n\
         They are looking for a {cuisine} restaurant.\n\n\
         User preferences:\n{preferences}\n\n\
         Strict requirements for the suggestion:\n{requirements}\n\n\
         {ask}\n\n\
         Respond ONLY in raw JSON (no markdown, no explanation) with the following structure:\n\
         {structure}",
        lat = coordinates.lat,
        lng = coordinates.lng,
        cuisine = request.cuisine(),
        preferences = preferences(request),
        requirements = non_negotiables(location),
        structure = output_structure(request),
    )
}

fn relaxed_text(request: &SuggestionRequest, location: &ResolvedLocation) -> String {
    let coordinates = request.coordinates();
    let ask = if request.include_chains() {
        "Suggest one primary restaurant that is the best match, even if it deviates from the \
         original preferences. Also provide 2-3 alternative popular chain restaurants."
    } else {
        "Suggest EXACTLY ONE restaurant that meets the strict requirements, even if it deviates \
         from the original preferences."
    };

    format!(
        "You are a restaurant recommendation assistant. A user's initial search returned no \
         results. Try again with more flexible criteria.\n\
         The user is located at latitude {lat}, longitude {lng}, in {location}. They are \
         looking for a {cuisine} restaurant.\n\n\
         Original preferences (these can be relaxed):\n{preferences}\n\n\
         Relaxed search instructions:\n\
         1. Find the best possible match even if it doesn't perfectly fit the budget, distance, \
         or dining preference.\n\
         2. Slightly expand the search radius or consider adjacent budget categories if no \
         direct match is found.\n\n\
         Strict requirements that CANNOT be relaxed:\n{requirements}\n\n\
         {ask}\n\n\
         Respond ONLY in raw JSON (no markdown, no explanation) with the following structure:\n\
         {structure}",
        lat = coordinates.lat,
        lng = coordinates.lng,
        cuisine = request.cuisine(),
        preferences = preferences(request),
        requirements = non_negotiables(location),
        structure = output_structure(request),
    )
}

fn restaurant_structure(request: &SuggestionRequest) -> serde_json::Value {
    serde_json::json!({
        "name": "Restaurant name",
        "address": "Full street address",
        "rating": "4.5",
        "reviewCount": "Number of reviews (e.g., 250+)",
        "cuisine": request.cuisine(),
        "priceRange": request.budget_label(),
        "diningOption": request.dining_preference_label(),
        "selectedFood": "Dish name",
        "website": "https://restaurant-website.com",
        "phone": "+1-555-123-4567",
        "description": "A short description of the restaurant",
        "isOpen": true
    })
}

fn output_structure(request: &SuggestionRequest) -> String {
    let structure = if request.include_chains() {
        serde_json::json!({
            "mainSuggestion": restaurant_structure(request),
            "chainAlternatives": [{
                "name": "Chain Restaurant Name",
                "address": "Full street address",
                "cuisine": request.cuisine()
            }]
        })
    } else {
        restaurant_structure(request)
    };
    serde_json::to_string_pretty(&structure).unwrap_or_else(|_| structure.to_string())
}
