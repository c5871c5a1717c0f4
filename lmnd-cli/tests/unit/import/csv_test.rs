use super::*;

const FACILITIES: &str = "\
id,lon,lat,cost_sourcing,is_depot
S1,7.1,50.7,0.335,false
DC,7.0,50.6,0.2,true";

const TIERS: &str = "\
facility_id,tier,capacity,cost_installation,cost_operation
S1,small,4,1000,50
S1,large,12,2500,120
DC,0,0,0,0";

const VEHICLES: &str = "\
id,kind,capacity,cost_fixed,time_prep,time_loading_per_item,time_set_up,time_service,speed_line_haul,speed_inter_stop,t_max,cost_hour,cost_km,cost_item,k
van,delivery,115,67,0.083,0.0011,0.033,0.016,50,35,12,53.9,0.37,0.5,0.57
truck,line_haul,460,268,0.166,0.0008,0.033,0.033,35,20,12,50,8.7,0.5,1.0";

const ZONES: &str = "\
id,lon,lat,area,k,speed_intra_stop
P1,7.2,50.8,1.5,0.57,20
P2,7.3,50.9,2.0,0.57,25";

#[test]
fn reads_facilities_with_expanded_tier_costs() {
    let facilities = read_facilities(FACILITIES.as_bytes(), TIERS.as_bytes(), 12).unwrap();

    assert_eq!(facilities.len(), 2);

    let satellite = facilities.iter().find(|facility| facility.id == "S1").unwrap();
    assert!(!satellite.is_depot);
    assert_eq!(satellite.tiers.len(), 2);
    assert_eq!(satellite.tier("large").map(|tier| tier.capacity), Some(12.));
    assert_eq!(satellite.tier("small").map(|tier| tier.cost_operation.len()), Some(12));
    assert_eq!(satellite.tier("small").map(|tier| tier.cost_operation[11]), Some(50.));

    let depot = facilities.iter().find(|facility| facility.id == "DC").unwrap();
    assert!(depot.is_depot);
}

#[test]
fn facilities_without_tier_rows_are_invalid() {
    let tiers = "facility_id,tier,capacity,cost_installation,cost_operation\nS1,small,4,1000,50";

    let result = read_facilities(FACILITIES.as_bytes(), tiers.as_bytes(), 12);

    assert!(matches!(result, Err(ModelError::InvalidData(_))));
}

#[test]
fn tier_rows_of_unknown_facilities_are_invalid() {
    let tiers = format!("{TIERS}\nS9,small,4,1000,50");

    let result = read_facilities(FACILITIES.as_bytes(), tiers.as_bytes(), 12);

    assert!(matches!(result, Err(ModelError::InvalidData(_))));
}

#[test]
fn reads_vehicles_with_their_kinds() {
    let vehicles = read_vehicles(VEHICLES.as_bytes()).unwrap();

    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].kind, VehicleKind::Delivery);
    assert_eq!(vehicles[1].kind, VehicleKind::LineHaul);
    assert_eq!(vehicles[1].k, 1.);
}

#[test]
fn unknown_vehicle_kinds_are_invalid() {
    let vehicles = VEHICLES.replace("line_haul", "drone");

    let result = read_vehicles(vehicles.as_bytes());

    assert!(matches!(result, Err(ModelError::InvalidData(_))));
}

#[test]
fn reads_zones_with_intra_stop_speeds_per_vehicle() {
    let zones = read_zones(ZONES.as_bytes(), &["van".to_string(), "truck".to_string()]).unwrap();

    assert_eq!(zones.len(), 2);

    let zone = &zones["P1"];
    assert_eq!(zone.area(), 1.5);
    assert!(!zone.is_available());
    assert_eq!(zone.location.speed_intra_stop.get("van"), Some(&20.));
    assert_eq!(zone.location.speed_intra_stop.get("truck"), Some(&20.));
}

#[test]
fn reads_both_distance_tables() {
    let zone_distances = "facility_id,zone_id,distance\nS1,P1,5.5\nDC,P1,12.0";
    let depot_distances = "facility_id,distance\nS1,8.25";

    let matrix = read_distances(zone_distances.as_bytes(), depot_distances.as_bytes()).unwrap();

    assert_eq!(matrix.zone_distance("S1", "P1").unwrap(), 5.5);
    assert_eq!(matrix.depot_distance("S1").unwrap(), 8.25);
    assert!(matches!(matrix.zone_distance("S1", "P2"), Err(ModelError::MissingDistance { .. })));
}
