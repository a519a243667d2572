//! Demo records shown whenever the service is unreachable or has nothing yet.

use serde_json::json;

use crate::record::{record_set, RecordSet};

pub fn loads() -> RecordSet {
    record_set(vec![
        json!({"id": "LD-001", "customer": "ABC Logistics", "origin": "Los Angeles, CA", "destination": "Phoenix, AZ", "rate": 2500, "status": "IN_TRANSIT", "pickupDate": "2026-02-20", "deliveryDate": "2026-02-21", "distance": 370, "weight": 42000, "commodity": "Electronics"}),
        json!({"id": "LD-002", "customer": "XYZ Freight", "origin": "Dallas, TX", "destination": "Houston, TX", "rate": 1200, "status": "DELIVERED", "pickupDate": "2026-02-18", "deliveryDate": "2026-02-18", "distance": 240, "weight": 18000, "commodity": "Furniture"}),
        json!({"id": "LD-003", "customer": "Global Cargo", "origin": "Miami, FL", "destination": "Atlanta, GA", "rate": 3100, "status": "DISPATCHED", "pickupDate": "2026-02-21", "deliveryDate": "2026-02-22", "distance": 660, "weight": 45000, "commodity": "Automotive Parts"}),
        json!({"id": "LD-004", "customer": "Metro Shipping", "origin": "Chicago, IL", "destination": "Detroit, MI", "rate": 1800, "status": "CREATED", "pickupDate": "2026-02-22", "deliveryDate": "2026-02-23", "distance": 280, "weight": 22000, "commodity": "Consumer Goods"}),
        json!({"id": "LD-005", "customer": "Coastal Transport", "origin": "Seattle, WA", "destination": "Portland, OR", "rate": 950, "status": "PICKED_UP", "pickupDate": "2026-02-19", "deliveryDate": "2026-02-20", "distance": 174, "weight": 15000, "commodity": "Food Products"}),
        json!({"id": "LD-006", "customer": "FastShip Inc", "origin": "Denver, CO", "destination": "Salt Lake City, UT", "rate": 2200, "status": "IN_TRANSIT", "pickupDate": "2026-02-19", "deliveryDate": "2026-02-20", "distance": 520, "weight": 38000, "commodity": "Medical Supplies"}),
        json!({"id": "LD-007", "customer": "Premier Logistics", "origin": "Boston, MA", "destination": "New York, NY", "rate": 1650, "status": "DELIVERED", "pickupDate": "2026-02-17", "deliveryDate": "2026-02-17", "distance": 215, "weight": 12000, "commodity": "Clothing"}),
        json!({"id": "LD-008", "customer": "TransGlobal", "origin": "San Francisco, CA", "destination": "Las Vegas, NV", "rate": 2800, "status": "CREATED", "pickupDate": "2026-02-23", "deliveryDate": "2026-02-24", "distance": 570, "weight": 40000, "commodity": "Machinery"}),
    ])
}

pub fn trucks() -> RecordSet {
    record_set(vec![
        json!({"id": "TRK-001", "truckNumber": "Truck-001", "make": "Freightliner", "model": "Cascadia", "year": 2022, "truckType": "DRY_VAN", "status": "AVAILABLE", "mileage": 125000, "fuelEfficiency": 7.2, "currentLocation": "Dallas, TX"}),
        json!({"id": "TRK-002", "truckNumber": "Truck-002", "make": "Kenworth", "model": "T680", "year": 2021, "truckType": "REEFER", "status": "IN_TRANSIT", "mileage": 180000, "fuelEfficiency": 6.8, "currentLocation": "Chicago, IL"}),
        json!({"id": "TRK-003", "truckNumber": "Truck-003", "make": "Peterbilt", "model": "579", "year": 2023, "truckType": "FLATBED", "status": "MAINTENANCE", "mileage": 45000, "fuelEfficiency": 7.5, "currentLocation": "Los Angeles, CA"}),
        json!({"id": "TRK-004", "truckNumber": "Truck-004", "make": "Volvo", "model": "VNL", "year": 2022, "truckType": "DRY_VAN", "status": "AVAILABLE", "mileage": 98000, "fuelEfficiency": 7.8, "currentLocation": "Miami, FL"}),
        json!({"id": "TRK-005", "truckNumber": "Truck-005", "make": "Mack", "model": "Anthem", "year": 2021, "truckType": "REEFER", "status": "IN_TRANSIT", "mileage": 145000, "fuelEfficiency": 6.5, "currentLocation": "Atlanta, GA"}),
        json!({"id": "TRK-006", "truckNumber": "Truck-006", "make": "International", "model": "LT", "year": 2020, "truckType": "FLATBED", "status": "AVAILABLE", "mileage": 210000, "fuelEfficiency": 6.9, "currentLocation": "Phoenix, AZ"}),
    ])
}

pub fn drivers() -> RecordSet {
    record_set(vec![
        json!({"id": 1, "firstName": "John", "lastName": "Smith", "phone": "+1 555-0101", "email": "john@demo.com", "status": "AVAILABLE", "safetyScore": 98, "totalMiles": 125000, "currentLocation": "Dallas, TX", "licenseExpiry": "2026-08-15", "rating": 4.9}),
        json!({"id": 2, "firstName": "Sarah", "lastName": "Johnson", "phone": "+1 555-0102", "email": "sarah@demo.com", "status": "ON_DUTY", "safetyScore": 100, "totalMiles": 98000, "currentLocation": "Chicago, IL", "licenseExpiry": "2026-11-20", "rating": 5.0}),
        json!({"id": 3, "firstName": "Mike", "lastName": "Davis", "phone": "+1 555-0103", "email": "mike@demo.com", "status": "AVAILABLE", "safetyScore": 95, "totalMiles": 150000, "currentLocation": "Los Angeles, CA", "licenseExpiry": "2025-12-01", "rating": 4.7}),
        json!({"id": 4, "firstName": "Emily", "lastName": "Wilson", "phone": "+1 555-0104", "email": "emily@demo.com", "status": "OFF_DUTY", "safetyScore": 99, "totalMiles": 87000, "currentLocation": "Miami, FL", "licenseExpiry": "2026-03-10", "rating": 4.8}),
        json!({"id": 5, "firstName": "Robert", "lastName": "Brown", "phone": "+1 555-0105", "email": "robert@demo.com", "status": "ON_DUTY", "safetyScore": 97, "totalMiles": 112000, "currentLocation": "Atlanta, GA", "licenseExpiry": "2026-06-22", "rating": 4.6}),
        json!({"id": 6, "firstName": "Lisa", "lastName": "Martinez", "phone": "+1 555-0106", "email": "lisa@demo.com", "status": "AVAILABLE", "safetyScore": 100, "totalMiles": 76000, "currentLocation": "Phoenix, AZ", "licenseExpiry": "2027-01-15", "rating": 4.9}),
    ])
}

pub fn customers() -> RecordSet {
    record_set(vec![
        json!({"id": 1, "companyName": "ABC Logistics", "contactPerson": "Robert Brown", "email": "robert@abclogistics.com", "phone": "+1 555-1001", "city": "Los Angeles", "country": "USA", "creditLimit": 50000, "balance": 12500, "totalLoads": 45, "revenue": 125000}),
        json!({"id": 2, "companyName": "XYZ Freight", "contactPerson": "Lisa Chen", "email": "lisa@xyzfreight.com", "phone": "+1 555-1002", "city": "Dallas", "country": "USA", "creditLimit": 75000, "balance": 8200, "totalLoads": 32, "revenue": 98000}),
        json!({"id": 3, "companyName": "Global Cargo", "contactPerson": "James Wilson", "email": "james@globalcargo.com", "phone": "+1 555-1003", "city": "Miami", "country": "USA", "creditLimit": 100000, "balance": 35000, "totalLoads": 78, "revenue": 245000}),
        json!({"id": 4, "companyName": "FastShip Inc", "contactPerson": "Maria Garcia", "email": "maria@fastship.com", "phone": "+1 555-1004", "city": "Chicago", "country": "USA", "creditLimit": 60000, "balance": 15800, "totalLoads": 56, "revenue": 156000}),
        json!({"id": 5, "companyName": "Premier Logistics", "contactPerson": "David Lee", "email": "david@premierlogistics.com", "phone": "+1 555-1005", "city": "Atlanta", "country": "USA", "creditLimit": 80000, "balance": 22000, "totalLoads": 63, "revenue": 189000}),
        json!({"id": 6, "companyName": "TransGlobal", "contactPerson": "Sarah Taylor", "email": "sarah@transglobal.com", "phone": "+1 555-1006", "city": "Phoenix", "country": "USA", "creditLimit": 90000, "balance": 4500, "totalLoads": 41, "revenue": 134000}),
    ])
}

pub fn invoices() -> RecordSet {
    record_set(vec![
        json!({"id": "INV-001", "invoiceNumber": "INV-2026-001", "customer": "ABC Logistics", "amount": 2500, "tax": 187.50, "total": 2687.50, "status": "PAID", "issueDate": "2026-02-15", "dueDate": "2026-03-15", "paidDate": "2026-02-20"}),
        json!({"id": "INV-002", "invoiceNumber": "INV-2026-002", "customer": "XYZ Freight", "amount": 1200, "tax": 90.00, "total": 1290.00, "status": "PENDING", "issueDate": "2026-02-18", "dueDate": "2026-03-18", "paidDate": null}),
        json!({"id": "INV-003", "invoiceNumber": "INV-2026-003", "customer": "Global Cargo", "amount": 3100, "tax": 232.50, "total": 3332.50, "status": "OVERDUE", "issueDate": "2026-01-20", "dueDate": "2026-02-20", "paidDate": null}),
        json!({"id": "INV-004", "invoiceNumber": "INV-2026-004", "customer": "Metro Shipping", "amount": 1800, "tax": 135.00, "total": 1935.00, "status": "PENDING", "issueDate": "2026-02-19", "dueDate": "2026-03-19", "paidDate": null}),
        json!({"id": "INV-005", "invoiceNumber": "INV-2026-005", "customer": "FastShip Inc", "amount": 950, "tax": 71.25, "total": 1021.25, "status": "PAID", "issueDate": "2026-02-10", "dueDate": "2026-03-10", "paidDate": "2026-02-15"}),
    ])
}

/// Board cards use lowercase statuses and carry assignment columns.
pub fn dispatch_loads() -> RecordSet {
    record_set(vec![
        json!({"id": "LD-001", "customer": "ABC Logistics", "pickup": "Los Angeles, CA", "delivery": "Phoenix, AZ", "date": "2026-02-20", "status": "created", "driver": null, "truck": null}),
        json!({"id": "LD-002", "customer": "XYZ Freight", "pickup": "Dallas, TX", "delivery": "Houston, TX", "date": "2026-02-20", "status": "dispatched", "driver": "John Smith", "truck": "Truck-001"}),
        json!({"id": "LD-003", "customer": "Global Cargo", "pickup": "Miami, FL", "delivery": "Atlanta, GA", "date": "2026-02-21", "status": "in_transit", "driver": "Sarah Johnson", "truck": "Truck-002"}),
        json!({"id": "LD-004", "customer": "Metro Shipping", "pickup": "Chicago, IL", "delivery": "Detroit, MI", "date": "2026-02-21", "status": "assigned", "driver": "Mike Davis", "truck": null}),
    ])
}
