//! Road trip prompt composition.

use orderly_domain::{ExpectedShape, TripRequest, MAX_DETOUR_MINUTES};

use crate::use_cases::generation::{ComposedPrompt, Strictness};

/// Itineraries have a single prompt; the level is recorded but does not
/// change the text.
pub fn compose(trip: &TripRequest, strictness: Strictness) -> ComposedPrompt {
    ComposedPrompt {
        strictness,
        text: text(trip),
        shape: ExpectedShape::Itinerary,
    }
}

fn text(trip: &TripRequest) -> String {
    let start = trip.start_coords;
    let end = trip.end_coords;
    let structure = serde_json::json!({
        "start_location": trip.start,
        "end_location": trip.end,
        "start_coords": { "latitude": start.lat, "longitude": start.lng },
        "end_coords": { "latitude": end.lat, "longitude": end.lng },
        "total_drive_miles": 1200,
        "total_drive_time_hours": "20",
        "route_description": "A detailed summary of the route, mentioning key landscapes or cities passed.",
        "main_highways": ["I-95 N", "I-80 E"],
        "stops": [{
            "name": "Name of the stop",
            "description": "A brief description of the stop.",
            "location": "City, State",
            "category": "Landmark",
            "latitude": 40.7128,
            "longitude": -74.006,
            "website": "https://example.com",
            "cost": "$$",
            "detour_time_minutes": 15,
            "hotel": {
                "name": "Name of a well-rated hotel near the stop",
                "booking_link": "https://www.booking.com/hotel/example.html"
            },
            "airbnb_link": "https://www.airbnb.com/s/City--State/homes"
        }]
    });
    let structure =
        serde_json::to_string_pretty(&structure).unwrap_or_else(|_| structure.to_string());

    format!(
        "You are an expert road trip planner. Find interesting stops and provide a complete trip \
         plan along the fastest drivable road route between two points. Follow these rules \
         strictly:\n\n\
         1. Identify the main route: determine the single fastest driving route from \"{from}\" \
         (coordinates: {slat}, {slng}) to \"{to}\" (coordinates: {elat}, {elng}). It must be a \
         conventional driving route for a standard car on major roads and highways, with no \
         ferries or off-road trails.\n\n\
         2. Find and verify stops: find {count} UNIQUE AND DISTINCT stops, geographically \
         ordered along the main route. Do not repeat a stop. For each stop:\n\
         a. Verify it is currently open and operating.\n\
         b. Verify it fits the traveller's preferences for activity ({activity}), duration \
         ({duration}) and cost ({cost}).\n\
         c. Only include a website that is official, active and reachable; otherwise leave \
         the website as an empty string \"\".\n\
         d. Calculate the round-trip detour time in minutes from the main highway to the stop \
         and back. This is 'detour_time_minutes'.\n\
         e. Provide the precise latitude and longitude.\n\
         f. Provide a category (e.g., Landmark, Museum, Park, Restaurant, Viewpoint).\n\
         g. Estimate the cost (e.g., Free, $, $$, $$$).\n\n\
         3. Enforce the detour limit: discard any stop whose 'detour_time_minutes' is greater \
         than {max_detour}. No exceptions.\n\n\
         4. Lodging: for EACH stop, suggest one specific, well-rated hotel with its name and a \
         direct, working booking link (Booking.com, Expedia, or the hotel's official site) as \
         'hotel'. Also provide a direct Airbnb search link for the stop's location as \
         'airbnb_link'. All links must be verified and working.\n\n\
         Output requirements:\n\
         - Every stop must be UNIQUE. No duplicates.\n\
         - Every stop MUST include a numeric 'detour_time_minutes'.\n\
         - The route must make logical driving sense with no large zigzags or backtracking.\n\n\
         Provide a route description, the main highways used, total miles, and total drive time \
         for the main route itself (excluding stops).\n\n\
         Respond ONLY in raw JSON (no markdown, no explanation) with the following structure:\n\
         {structure}",
        from = trip.start,
        to = trip.end,
        slat = start.lat,
        slng = start.lng,
        elat = end.lat,
        elng = end.lng,
        count = trip.stop_count.describe(),
        activity = trip.activity.describe(),
        duration = trip.stop_duration.describe(),
        cost = trip.cost.describe(),
        max_detour = MAX_DETOUR_MINUTES,
    )
}
