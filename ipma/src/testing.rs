//! Canned datasets around Aveiro, served by a [`MockGateway`].

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};

use crate::config::IpmaConfig;
use crate::domain::{Coordinate, DayOffset, SeaDay};
use crate::gateway::{Endpoints, MockGateway};
use crate::session::Session;

pub const BASE_URL: &str = "http://ipma.test";

/// The point every scenario starts from.
pub fn origin() -> Coordinate {
    Coordinate::new(40.6517, -8.6573).unwrap()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn endpoints() -> Endpoints {
    Endpoints::new(BASE_URL)
}

pub fn config() -> IpmaConfig {
    IpmaConfig::new().with_base_url(BASE_URL)
}

pub fn session() -> Session<MockGateway> {
    session_with(gateway())
}

pub fn session_with(gateway: MockGateway) -> Session<MockGateway> {
    Session::with_gateway(gateway, config())
}

/// A gateway serving every dataset.
pub fn gateway() -> MockGateway {
    let e = endpoints();

    let gateway = MockGateway::new()
        .with_json(e.districts(), districts())
        .with_json(e.forecast_locations(), forecast_locations())
        .with_json(e.sea_locations(), sea_locations())
        .with_json(e.stations(), stations())
        .with_json(e.observations(), observations())
        .with_json(e.weather_types(), weather_types())
        .with_json(e.wind_speed_classes(), wind_speed_classes())
        .with_json(e.precipitation_classes(), precipitation_classes())
        .with_json(e.fire_risk(DayOffset::Today), fire_risk(3))
        .with_json(e.fire_risk(DayOffset::Tomorrow), fire_risk(4))
        .with_json(e.uv(), uv())
        .with_json(e.warnings(), warnings());

    for id in [1010500, 1011000, 1131200] {
        gateway.insert_json(e.forecast(id), forecast(id));
    }
    for day in SeaDay::ALL {
        gateway.insert_json(e.sea_forecast(day), sea_forecast(day));
    }

    gateway
}

fn place(id: u32, name: &str, district: u32, area: &str, lat: f64, lon: f64) -> Value {
    json!({
        "idRegiao": 1, "idAreaAviso": area, "idConcelho": 5, "globalIdLocal": id,
        "latitude": lat.to_string(), "idDistrito": district, "local": name,
        "longitude": lon.to_string()
    })
}

pub fn districts() -> Value {
    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": [
            place(1110600, "Lisboa", 11, "LSB", 38.7660, -9.1286),
            place(1010500, "Aveiro", 1, "AVR", 40.6413, -8.6535),
            place(1131200, "Porto", 13, "PTO", 41.1580, -8.6294),
        ]
    })
}

pub fn forecast_locations() -> Value {
    json!([
        place(1110600, "Lisboa", 11, "LSB", 38.7660, -9.1286),
        place(1131200, "Porto", 13, "PTO", 41.1580, -8.6294),
        place(1011000, "Ílhavo", 1, "AVR", 40.6000, -8.6667),
        place(1010500, "Aveiro", 1, "AVR", 40.6413, -8.6535),
    ])
}

pub fn sea_locations() -> Value {
    json!([
        {"idRegiao": 1, "idAreaAviso": "PTO", "globalIdLocal": 1131200, "idLocal": 1,
         "latitude": "41.1400", "local": "Porto", "longitude": "-8.6900"},
        {"idRegiao": 1, "idAreaAviso": "AVR", "globalIdLocal": 1010500, "idLocal": 2,
         "latitude": "40.6400", "local": "Aveiro", "longitude": "-8.7500"},
    ])
}

fn station(id: u32, name: &str, lat: f64, lon: f64) -> Value {
    json!({
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "type": "Feature",
        "properties": {"idEstacao": id, "localEstacao": name}
    })
}

pub fn stations() -> Value {
    json!([
        station(1200579, "Lisboa (Geofísico)", 38.7192, -9.1497),
        station(1210718, "Porto, Pedras Rubras", 41.2335, -8.6804),
        station(1210881, "Ovar / Maceda", 40.9155, -8.6446),
        station(1210702, "Aveiro (Universidade)", 40.63529722, -8.65958333),
    ])
}

pub fn reading(temperature: f64, humidity: f64) -> Value {
    json!({
        "intensidadeVentoKM": 11.9, "temperatura": temperature, "radiacao": 502.1,
        "idDireccVento": 8, "precAcumulada": 0.0, "intensidadeVento": 3.3,
        "humidade": humidity, "pressao": 1017.4
    })
}

pub fn observations() -> Value {
    json!({
        "2024-05-01T09:00": {
            "1210702": reading(16.2, 77.0),
            "1210881": reading(15.0, 80.0),
            "1210718": null
        },
        "2024-05-01T10:00": {
            "1210702": reading(17.4, 71.0),
            "1210881": reading(15.8, 79.0),
            "1210718": reading(-99.0, -99.0)
        }
    })
}

fn classifier(id_key: &str, en_key: &str, pt_key: &str, rows: &[(i64, &str, &str)]) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|(id, en, pt)| {
            let mut entry = Map::new();
            entry.insert(id_key.to_string(), Value::from(id.to_string()));
            entry.insert(en_key.to_string(), Value::from(*en));
            entry.insert(pt_key.to_string(), Value::from(*pt));
            Value::Object(entry)
        })
        .collect();
    json!({"owner": "IPMA", "country": "PT", "data": data})
}

pub fn weather_types() -> Value {
    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": [
            {"descWeatherTypeEN": "--", "descWeatherTypePT": "---", "idWeatherType": -99},
            {"descWeatherTypeEN": "No information", "descWeatherTypePT": "Sem informação", "idWeatherType": 0},
            {"descWeatherTypeEN": "Clear sky", "descWeatherTypePT": "Céu limpo", "idWeatherType": 1},
            {"descWeatherTypeEN": "Partly cloudy", "descWeatherTypePT": "Céu pouco nublado", "idWeatherType": 2},
            {"descWeatherTypeEN": "Light rain", "descWeatherTypePT": "Chuva fraca", "idWeatherType": 9}
        ]
    })
}

pub fn wind_speed_classes() -> Value {
    classifier(
        "classWindSpeed",
        "descClassWindSpeedDailyEN",
        "descClassWindSpeedDailyPT",
        &[
            (-99, "--", "--"),
            (1, "Weak", "Fraco"),
            (2, "Moderate", "Moderado"),
            (3, "Strong", "Forte"),
            (4, "Very strong", "Muito forte"),
        ],
    )
}

pub fn precipitation_classes() -> Value {
    classifier(
        "classPrecInt",
        "descClassPrecIntEN",
        "descClassPrecIntPT",
        &[
            (-99, "--", "---"),
            (0, "No precipitation", "Sem precipitação"),
            (1, "Weak", "Fraco"),
            (2, "Moderate", "Moderado"),
        ],
    )
}

fn stamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Aggregate forecast rows for `id`, relative to the current time.
pub fn forecast(id: u32) -> Value {
    let now = now();
    let updated = stamp(now - Duration::hours(3));

    json!([
        {
            "tMin": 9.0, "tMax": 18.0, "idFfxVento": 2, "idPeriodo": 24,
            "dataPrev": stamp(now - Duration::days(2)), "dataUpdate": updated,
            "idTipoTempo": 2, "globalIdLocal": id, "probabilidadePrecipita": "0.0",
            "ddVento": "N"
        },
        {
            "tMin": "10.4", "tMax": "19.8", "idFfxVento": 1, "idPeriodo": 24,
            "dataPrev": stamp(now + Duration::hours(2)), "dataUpdate": updated,
            "idTipoTempo": 1, "globalIdLocal": id, "probabilidadePrecipita": "2.0",
            "ddVento": "NW", "iUv": "6.1"
        },
        {
            "tMin": 11.0, "tMax": 16.5, "idFfxVento": -99, "idPeriodo": 24,
            "dataPrev": stamp(now + Duration::hours(26)), "dataUpdate": updated,
            "idTipoTempo": 9, "globalIdLocal": id, "probabilidadePrecipita": "87.0",
            "ddVento": "SW", "idIntensidadePrecipita": 1
        },
        {
            "tMed": 17.3, "hR": 71.0, "utci": 16.8, "ffVento": 14.0, "idFfxVento": 2,
            "idPeriodo": 3, "dataPrev": stamp(now + Duration::hours(3)), "dataUpdate": updated,
            "idTipoTempo": 2, "globalIdLocal": id, "probabilidadePrecipita": -99.0,
            "ddVento": "W", "intervaloHora": "12h-15h"
        }
    ])
}

pub fn sea_forecast(day: SeaDay) -> Value {
    let offset = i64::from(day.offset());
    let date = (now() + Duration::days(offset)).format("%Y-%m-%d").to_string();

    json!({
        "owner": "IPMA",
        "country": "PT",
        "forecastDate": date,
        "dataUpdate": stamp(now() - Duration::hours(6)),
        "data": [
            {
                "globalIdLocal": 1010500, "wavePeriodMin": "9.8", "wavePeriodMax": "11.4",
                "waveHighMin": "1.4", "waveHighMax": "2.1", "totalSeaMin": "1.5",
                "totalSeaMax": "2.2", "sstMin": "15.2", "sstMax": "16.1",
                "predWaveDir": "NW", "lat": "40.64", "lon": "-8.75"
            },
            {
                "globalIdLocal": 1131200, "wavePeriodMin": "10.1", "wavePeriodMax": "12.0",
                "waveHighMin": "1.8", "waveHighMax": "2.6", "totalSeaMin": "1.9",
                "totalSeaMax": "2.7", "sstMin": "14.8", "sstMax": "15.5",
                "predWaveDir": "W", "lat": "41.14", "lon": "-8.69"
            }
        ]
    })
}

pub fn fire_risk(aveiro_level: i64) -> Value {
    json!({
        "local": {
            "0105": {"data": {"rcm": aveiro_level}, "dico": "0105", "latitude": 40.6413, "longitude": -8.6535},
            "1312": {"data": {"rcm": 1}, "dico": "1312", "latitude": 41.1580, "longitude": -8.6294}
        }
    })
}

pub fn uv() -> Value {
    let today = now().format("%Y-%m-%d").to_string();
    let tomorrow = (now() + Duration::days(1)).format("%Y-%m-%d").to_string();

    json!([
        {"idPeriodo": 24, "intervaloHora": "", "data": tomorrow, "globalIdLocal": 1010500, "iUv": "3.4"},
        {"idPeriodo": 24, "intervaloHora": "", "data": today, "globalIdLocal": 1010500, "iUv": "8.2"},
        {"idPeriodo": 24, "intervaloHora": "", "data": today, "globalIdLocal": 1131200, "iUv": "7.1"}
    ])
}

pub fn warnings() -> Value {
    json!([
        {
            "text": "", "awarenessTypeName": "Tempo Quente", "idAreaAviso": "LSB",
            "startTime": "2024-05-01T00:00:00", "awarenessLevelID": "green",
            "endTime": "2024-05-03T00:00:00"
        },
        {
            "text": "Ondas de noroeste com 4 a 5 metros.", "awarenessTypeName": "Agitação Marítima",
            "idAreaAviso": "AVR", "startTime": "2024-05-01T06:00:00",
            "awarenessLevelID": "yellow", "endTime": "2024-05-01T21:00:00"
        },
        {
            "text": "", "awarenessTypeName": "Nevoeiro", "idAreaAviso": "AVR",
            "startTime": "2024-05-01T00:00:00", "awarenessLevelID": "green",
            "endTime": "2024-05-02T00:00:00"
        },
        {
            "text": "Rajadas até 90 km/h.", "awarenessTypeName": "Vento", "idAreaAviso": "AVR",
            "startTime": "2024-05-01T12:00:00", "awarenessLevelID": "orange",
            "endTime": "2024-05-02T00:00:00"
        }
    ])
}
