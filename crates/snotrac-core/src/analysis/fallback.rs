// Canned paragraphs shown when no live analysis is available.

pub const SNOWPLOW_STATUS: &str = "Analysis unavailable - Using cached insights:

Based on current snow conditions in NYC:
• Multiple snowplows active on major corridors
• 5th Avenue and Broadway showing good progress
• Park Avenue and Madison Ave still need clearing
• Expect 12-15 minute transit delays
• Recommend using recently cleared routes
• Monitor conditions every 10 minutes";

pub const ROUTE_CONDITIONS: &str = "Route Safety Assessment: CAUTION

Travel Recommendation:
Conditions are challenging but passable. Allow extra time for your journey.

Best Travel Mode:
Public transit is experiencing 12-15 minute delays. Driving recommended with caution.

Specific Travel Tips:
1. Avoid Madison Avenue and Park Avenue if possible
2. Use recently cleared routes like Broadway and 5th Avenue
3. Drive slowly and maintain increased following distance
4. Check conditions again before departing
5. Have an alternative route ready

Estimated Delay Impact: +10-15 minutes added to normal travel time";

pub const SAFETY_INSIGHTS: &str = "Overall Safety Level: CAUTION

Top 3 Safety Risks:
1. Slippery road conditions on uncleared routes (Park Ave, Madison Ave)
2. Reduced visibility due to active snowfall
3. Increased vehicle accidents due to weather conditions

High-Risk Areas to Avoid:
• Madison Avenue (impassable - 7.2\" snow)
• Park Avenue (caution zone - 5.6\" snow, high winds)
• Side streets not yet cleared

Safety Recommendations:
• Reduce speed and maintain safe distances
• Use winter tires or chains
• Avoid unnecessary travel if possible
• Keep phone charged and have emergency contacts ready";

pub const TRAFFIC_PREDICTION: &str = "Next 30 Minutes Prediction: WORSENING

Traffic Pattern Analysis:
Conditions expected to worsen slightly as snow continues. Most congestion on secondary routes.

Routes Likely to Become Congested:
• West Side Highway (already heavy - expect worse)
• Crosstown routes (Broadway to Park Ave)
• FDR Drive approach ramps

Routes Likely to Improve:
• Recently plowed Broadway corridor
• 5th Avenue north of Central Park
• Main arterials with active plow coverage

Overall Recommendation:
Avoid travel if possible. If you must travel, use Broadway or 5th Avenue. Expect delays on all routes.";
