use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    Open,
    Responded,
    NegotiationRequested,
    DoqProvided,
    Accepted,
    Rejected,
    Resubmitted,
    Closed,
    Fulfilled,
}

/// The side of an RFQ a caller acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfqParty {
    Buyer,
    Seller,
    Moderator,
}

impl RfqStatus {
    pub const ALL: [RfqStatus; 9] = [
        RfqStatus::Open,
        RfqStatus::Responded,
        RfqStatus::NegotiationRequested,
        RfqStatus::DoqProvided,
        RfqStatus::Accepted,
        RfqStatus::Rejected,
        RfqStatus::Resubmitted,
        RfqStatus::Closed,
        RfqStatus::Fulfilled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RfqStatus::Open => "open",
            RfqStatus::Responded => "responded",
            RfqStatus::NegotiationRequested => "negotiation_requested",
            RfqStatus::DoqProvided => "doq_provided",
            RfqStatus::Accepted => "accepted",
            RfqStatus::Rejected => "rejected",
            RfqStatus::Resubmitted => "resubmitted",
            RfqStatus::Closed => "closed",
            RfqStatus::Fulfilled => "fulfilled",
        }
    }

    /// Statuses in which the seller side has answered the buyer.
    pub fn is_responded_family(&self) -> bool {
        matches!(
            self,
            RfqStatus::Responded | RfqStatus::NegotiationRequested | RfqStatus::DoqProvided
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RfqStatus::Accepted | RfqStatus::Rejected | RfqStatus::Closed | RfqStatus::Fulfilled
        )
    }

    /// Status an RFQ takes after its buyer edits the details.
    pub fn after_buyer_edit(self) -> RfqStatus {
        if self.is_responded_family() {
            RfqStatus::Resubmitted
        } else {
            self
        }
    }

    pub fn can_transition(self, next: RfqStatus, party: RfqParty) -> bool {
        use RfqParty::*;
        use RfqStatus::*;

        if self.is_terminal() && !(self == Accepted && next == Fulfilled) {
            return false;
        }

        match next {
            Responded => {
                matches!(party, Seller | Moderator)
                    && matches!(self, Open | Resubmitted | NegotiationRequested)
            }
            DoqProvided => party == Moderator,
            NegotiationRequested | Accepted | Rejected => {
                party == Buyer && matches!(self, Responded | DoqProvided)
            }
            Closed => party == Buyer,
            Fulfilled => matches!(party, Seller | Moderator) && self == Accepted,
            Open | Resubmitted => false,
        }
    }
}

impl fmt::Display for RfqStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RfqStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RfqStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown RFQ status: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::RfqParty::*;
    use super::RfqStatus::*;
    use super::*;

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(
            "negotiation_requested".parse::<RfqStatus>().unwrap(),
            NegotiationRequested
        );
        assert_eq!("doq_provided".parse::<RfqStatus>().unwrap(), DoqProvided);
        assert!("pending".parse::<RfqStatus>().is_err());
    }

    #[test]
    fn buyer_edit_resubmits_only_answered_rfqs() {
        assert_eq!(Responded.after_buyer_edit(), Resubmitted);
        assert_eq!(NegotiationRequested.after_buyer_edit(), Resubmitted);
        assert_eq!(DoqProvided.after_buyer_edit(), Resubmitted);
        assert_eq!(Open.after_buyer_edit(), Open);
        assert_eq!(Resubmitted.after_buyer_edit(), Resubmitted);
    }

    #[test]
    fn seller_answers_open_and_resubmitted_rfqs() {
        assert!(Open.can_transition(Responded, Seller));
        assert!(Resubmitted.can_transition(Responded, Seller));
        assert!(NegotiationRequested.can_transition(Responded, Moderator));
        assert!(!Open.can_transition(Responded, Buyer));
        assert!(!Responded.can_transition(Responded, Seller));
    }

    #[test]
    fn only_moderators_provide_doq() {
        assert!(Open.can_transition(DoqProvided, Moderator));
        assert!(Responded.can_transition(DoqProvided, Moderator));
        assert!(!Open.can_transition(DoqProvided, Seller));
        assert!(!Closed.can_transition(DoqProvided, Moderator));
    }

    #[test]
    fn buyer_decides_after_a_response() {
        for next in [NegotiationRequested, Accepted, Rejected] {
            assert!(Responded.can_transition(next, Buyer));
            assert!(DoqProvided.can_transition(next, Buyer));
            assert!(!Open.can_transition(next, Buyer));
            assert!(!Responded.can_transition(next, Seller));
        }
    }

    #[test]
    fn accepted_rfqs_can_only_be_fulfilled() {
        assert!(Accepted.can_transition(Fulfilled, Seller));
        assert!(Accepted.can_transition(Fulfilled, Moderator));
        assert!(!Accepted.can_transition(Fulfilled, Buyer));
        assert!(!Accepted.can_transition(Closed, Buyer));
        assert!(!Responded.can_transition(Fulfilled, Seller));
    }

    #[test]
    fn nothing_leaves_a_finished_rfq() {
        for from in [Rejected, Closed, Fulfilled] {
            for next in RfqStatus::ALL {
                for party in [Buyer, Seller, Moderator] {
                    assert!(!from.can_transition(next, party), "{from} -> {next}");
                }
            }
        }
    }

    #[test]
    fn open_and_resubmitted_are_never_set_directly() {
        for from in RfqStatus::ALL {
            for party in [Buyer, Seller, Moderator] {
                assert!(!from.can_transition(Open, party));
                assert!(!from.can_transition(Resubmitted, party));
            }
        }
    }
}
