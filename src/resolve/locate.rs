// src/resolve/locate.rs
use crate::geo::{Coordinate, GeocodeError, Geocoder};

/// Position for a source that only gives text: the address itself, then
/// `"{name}, {scope}"`. `None` means the record cannot be placed.
pub fn locate(geocoder: &dyn Geocoder, name: &str, address: &str, scope: Option<&str>) -> Option<Coordinate> {
    let mut queries = vec![s!(address.trim())];
    if let Some(scope) = present!(scope) {
        queries.push(format!("{name}, {scope}"));
    } else {
        queries.push(s!(name.trim()));
    }

    for query in queries.iter().filter(|q| !q.is_empty()) {
        match geocoder.forward(query) {
            Ok(at) => {
                logd!("Locate: {query:?} → {}", at.label());
                return Some(at);
            }
            Err(GeocodeError::NotFound) => logd!("Locate: no match for {query:?}"),
            Err(e) => logw!("Locate: {query:?}: {e}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::geo::{AddressComponents, BoundingBox};

    /// Knows one query; records all of them.
    struct OneHit {
        known: &'static str,
        asked: RefCell<Vec<String>>,
    }

    impl Geocoder for OneHit {
        fn forward(&self, query: &str) -> Result<Coordinate, GeocodeError> {
            self.asked.borrow_mut().push(s!(query));
            if query == self.known { Ok(Coordinate::new(1.0, 2.0)) } else { Err(GeocodeError::NotFound) }
        }
        fn reverse(&self, _: Coordinate) -> Result<AddressComponents, GeocodeError> {
            Err(GeocodeError::NotFound)
        }
        fn bounding_box(&self, _: &str) -> Result<BoundingBox, GeocodeError> {
            Err(GeocodeError::NotFound)
        }
    }

    #[test]
    fn address_first_then_name_in_scope() {
        let geo = OneHit { known: "Pan Am Park, Austin, TX", asked: RefCell::new(vec![]) };
        let at = locate(&geo, "Pan Am Park", "somewhere vague", Some("Austin, TX"));
        assert_eq!(at, Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(*geo.asked.borrow(), vec![s!("somewhere vague"), s!("Pan Am Park, Austin, TX")]);
    }

    #[test]
    fn stops_at_first_hit() {
        let geo = OneHit { known: "2100 E 3rd St", asked: RefCell::new(vec![]) };
        assert!(locate(&geo, "Pan Am Park", "2100 E 3rd St", Some("Austin, TX")).is_some());
        assert_eq!(geo.asked.borrow().len(), 1);
    }

    #[test]
    fn exhausted_chain_is_none() {
        let geo = OneHit { known: "nowhere", asked: RefCell::new(vec![]) };
        assert_eq!(locate(&geo, "Ghost Courts", "1 Missing Rd", None), None);
        assert_eq!(geo.asked.borrow().len(), 2);
    }
}
