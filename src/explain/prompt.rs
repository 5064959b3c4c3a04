use crate::core::bet::BetRequest;
use crate::core::handicap::HandicapType;
use crate::core::outcome::SettlementResult;

/// Build the instruction text sent to an external text-generation service.
///
/// The prompt carries the full request, the computed settlement and a hint
/// about which rule applies, so the service only has to narrate.
pub fn build_prompt(request: &BetRequest, result: &SettlementResult) -> String {
    let hint = match request.handicap_type {
        HandicapType::Asian if request.line.is_quarter() => {
            "This is a quarter line: describe how the stake is split into two halves on adjacent lines."
        }
        HandicapType::Asian => {
            "This is a 2-way Asian line: describe when the stake is won, lost or returned."
        }
        HandicapType::European => {
            "This is a 3-way European line: describe the home, draw and away outcomes."
        }
    };

    format!(
        "Role: handicap settlement analyst.\n\
         \n\
         Match input:\n\
         - Handicap type: {}\n\
         - Score: Home {} - Away {}\n\
         - Handicap line: {}\n\
         - Selection: {}\n\
         - Odds: {}\n\
         - Stake: {}\n\
         \n\
         Settlement:\n\
         - Status: {}\n\
         - Payout: {:.2}\n\
         - Net profit: {:.2}\n\
         \n\
         Task: explain concisely and technically how the handicap line and the score produce this result.\n\
         {}\n",
        request.handicap_type,
        request.score.home,
        request.score.away,
        request.line.asian_label(),
        request.selection,
        request.odds,
        request.stake,
        result.status(),
        result.payout(),
        result.net_profit(),
        hint
    )
}
